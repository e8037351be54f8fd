//! Runtime configuration
//!
//! Every field has a default matching the file names the service keeps in
//! its working directory. A TOML file may override any of them, and CLI flags
//! override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Stargate jump table (CSV)
    pub topology_path: PathBuf,
    /// System cache (JSON object keyed by system id)
    pub systems_path: PathBuf,
    /// Kill statistics (JSON array)
    pub activity_path: PathBuf,
    /// Signature/wormhole pair payloads
    pub signature_feeds: Vec<PathBuf>,
    /// Direct connection payloads
    pub connection_feeds: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            topology_path: PathBuf::from("mapSolarSystemJumps.csv"),
            systems_path: PathBuf::from("systems.json"),
            activity_path: PathBuf::from("kills.json"),
            signature_feeds: Vec::new(),
            connection_feeds: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("unable to read {}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
