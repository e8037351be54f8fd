//! Base topology and per-request snapshots
//!
//! The base graph is loaded once and never mutated afterwards. Every route
//! request takes a [`Snapshot`], which borrows the base through an `Arc` and
//! owns a private overlay map. Installing an overlay on one snapshot is never
//! observable from another snapshot or from the base.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::core::error::{Error, Result};
use crate::core::overlay::Link;

/// Opaque solar system identifier
pub type NodeId = u32;

/// Edge cost; feeds currently always supply 1
pub type Weight = u32;

/// Identifiers below this value are reserved and never routable
pub const RESERVED_NODE_THRESHOLD: NodeId = 30_000_000;

/// Weight of every edge loaded from the bulk topology source
pub const BASE_EDGE_WEIGHT: Weight = 1;

/// CSV columns holding the endpoints (0-indexed)
const FROM_COLUMN: usize = 2;
const TO_COLUMN: usize = 3;

/// Directed half of a symmetric connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub to: NodeId,
    pub weight: Weight,
}

type Adjacency = HashMap<NodeId, Vec<Edge>>;

/// Install `from <-> to` in both directions with the same weight
fn add_symmetric(adj: &mut Adjacency, from: NodeId, to: NodeId, weight: Weight) {
    adj.entry(from).or_default().push(Edge { to, weight });
    adj.entry(to).or_default().push(Edge { to: from, weight });
}

/// Summary of a bulk load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows that produced an edge pair
    pub rows_loaded: usize,
    /// Malformed rows that were dropped
    pub rows_skipped: usize,
    /// Whether the first row was recognised as a header
    pub header_skipped: bool,
}

/// Immutable base connectivity
#[derive(Debug, Default)]
pub struct Topology {
    base: Adjacency,
}

impl Topology {
    /// Load the base graph from a CSV file
    ///
    /// A missing or unreadable file is fatal; malformed rows are not.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_path_with_report(path).map(|(topology, _)| topology)
    }

    /// [`Topology::load_path`], also returning the row counts
    pub fn load_path_with_report<P: AsRef<Path>>(path: P) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let (topology, report) = Self::load_with_report(file).map_err(|err| match err {
            Error::Io(source) => Error::Load {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        info!(
            "Loaded {} systems ({} rows, {} skipped) from {}",
            topology.size(),
            report.rows_loaded,
            report.rows_skipped,
            path.display()
        );
        Ok((topology, report))
    }

    /// Load the base graph from any tabular CSV source
    pub fn load<R: Read>(source: R) -> Result<Self> {
        Self::load_with_report(source).map(|(topology, _)| topology)
    }

    /// Load the base graph and report how many rows were used or dropped
    ///
    /// Rows need at least four fields; columns 2 and 3 are the endpoints and
    /// every edge gets [`BASE_EDGE_WEIGHT`]. Header detection is a heuristic
    /// that applies to the very first row only: if its column 2 is not an
    /// integer the row is taken as a header and discarded. Any later row that
    /// fails to parse is counted as skipped, never as a header.
    pub fn load_with_report<R: Read>(source: R) -> Result<(Self, LoadReport)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut base = Adjacency::new();
        let mut report = LoadReport::default();
        let mut record = csv::StringRecord::new();
        let mut first_row = true;
        let mut row = 0usize;

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => match err.into_kind() {
                    csv::ErrorKind::Io(io) => return Err(Error::Io(io)),
                    kind => {
                        row += 1;
                        debug!("Skipping unreadable row {row}: {kind:?}");
                        report.rows_skipped += 1;
                        first_row = false;
                        continue;
                    }
                },
            }
            row += 1;

            if first_row {
                first_row = false;
                let is_header = record
                    .get(FROM_COLUMN)
                    .map_or(false, |field| field.trim().parse::<NodeId>().is_err());
                if is_header {
                    report.header_skipped = true;
                    continue;
                }
            }

            match parse_row(&record) {
                Some((from, to)) => {
                    add_symmetric(&mut base, from, to, BASE_EDGE_WEIGHT);
                    report.rows_loaded += 1;
                }
                None => {
                    debug!("Skipping malformed row {row}: {record:?}");
                    report.rows_skipped += 1;
                }
            }
        }

        Ok((Self { base }, report))
    }

    /// Build a base graph directly from links, keeping each link's cost
    pub fn from_links<I: IntoIterator<Item = Link>>(links: I) -> Self {
        let mut base = Adjacency::new();
        for link in links {
            add_symmetric(&mut base, link.from, link.to, link.cost);
        }
        Self { base }
    }

    /// Number of distinct systems with base adjacency entries
    pub fn size(&self) -> usize {
        self.base.len()
    }

    /// Number of directed base edges (twice the number of connections)
    pub fn edge_count(&self) -> usize {
        self.base.values().map(Vec::len).sum()
    }

    /// Base edges leaving `node`; isolated nodes have none
    pub fn edges(&self, node: NodeId) -> &[Edge] {
        self.base.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Take a request-local view with an empty private overlay
    pub fn snapshot(self: &Arc<Self>) -> Snapshot {
        Snapshot {
            base: Arc::clone(self),
            overlay: Adjacency::new(),
        }
    }
}

fn parse_row(record: &csv::StringRecord) -> Option<(NodeId, NodeId)> {
    if record.len() < 4 {
        return None;
    }
    let from = record.get(FROM_COLUMN)?.trim().parse().ok()?;
    let to = record.get(TO_COLUMN)?.trim().parse().ok()?;
    Some((from, to))
}

/// Base topology plus an overlay owned by a single request
#[derive(Debug, Clone)]
pub struct Snapshot {
    base: Arc<Topology>,
    overlay: Adjacency,
}

impl Snapshot {
    /// Replace the whole overlay with `links`, installed symmetrically
    pub fn install_overlay(&mut self, links: &[Link]) {
        let mut overlay = Adjacency::new();
        for link in links {
            add_symmetric(&mut overlay, link.from, link.to, link.cost);
        }
        self.overlay = overlay;
    }

    /// Base edges of `node` followed by its overlay edges
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        let overlay = self.overlay.get(&node).map(Vec::as_slice).unwrap_or(&[]);
        self.base.edges(node).iter().chain(overlay.iter())
    }

    /// Overlay edges leaving `node`
    pub fn overlay_edges(&self, node: NodeId) -> &[Edge] {
        self.overlay.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of systems with overlay entries
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }
}
