//! Loading of optional route inputs
//!
//! Decoration files and feed payloads are best-effort: a missing or broken
//! file is logged and routing continues without it.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use short_circuit::{ActivityTable, Connection, Link, OverlayBuilder, SignatureFeed, SystemDirectory};

pub fn load_directory(path: &Path) -> SystemDirectory {
    SystemDirectory::load(path).unwrap_or_else(|e| {
        warn!("Could not load system directory {}: {e}", path.display());
        SystemDirectory::default()
    })
}

pub fn load_activity(path: &Path) -> ActivityTable {
    ActivityTable::load(path).unwrap_or_else(|e| {
        warn!("Could not read activity file {}: {e}", path.display());
        ActivityTable::default()
    })
}

/// Every feed file that could be read and parsed
#[derive(Debug, Default)]
pub struct Feeds {
    pub signatures: Vec<SignatureFeed>,
    pub connections: Vec<Connection>,
}

impl Feeds {
    pub fn load(signature_feeds: &[PathBuf], connection_feeds: &[PathBuf]) -> Self {
        let signatures = signature_feeds
            .iter()
            .filter_map(|path| read_feed(path, SignatureFeed::from_json))
            .collect();
        let connections = connection_feeds
            .iter()
            .filter_map(|path| read_feed(path, Connection::list_from_json))
            .flatten()
            .collect();
        Self {
            signatures,
            connections,
        }
    }

    /// Overlay links from all loaded feeds
    pub fn overlay(&self) -> Vec<Link> {
        let builder = self
            .signatures
            .iter()
            .fold(OverlayBuilder::new(), |builder, feed| builder.with_signature_feed(feed))
            .with_connections(&self.connections);

        let report = builder.report();
        if report.dropped > 0 {
            warn!("Dropped {} incomplete wormhole records", report.dropped);
        }
        builder.build()
    }
}

fn read_feed<T>(path: &Path, parse: impl Fn(&str) -> short_circuit::Result<T>) -> Option<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Failed to read feed {}: {e}", path.display());
            return None;
        }
    };
    match parse(&contents) {
        Ok(feed) => Some(feed),
        Err(e) => {
            warn!("Failed to parse feed {}: {e}", path.display());
            None
        }
    }
}
