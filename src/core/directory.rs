//! Node decoration services backed by local JSON files
//!
//! The system directory is the on-disk system cache (id string -> name and
//! security status); the activity table is the periodically refreshed
//! per-system kill statistics. Both degrade to sentinels and zero counters
//! on a miss.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{suggest_correction, Error, Result};
use crate::core::feed::{decode_list, decode_map, null_as_default};
use crate::core::reconstruct::UNKNOWN_SYSTEM;
use crate::core::topology::{NodeId, RESERVED_NODE_THRESHOLD};

/// Full details of a solar system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub security_status: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_id: NodeId,
}

/// Name and detail resolution for route decoration
///
/// The reserved-id guard belongs to `system_name` only: ids below
/// [`RESERVED_NODE_THRESHOLD`] are always named `"Unknown"`, while
/// `system_details` returns whatever the backing store holds for any id.
pub trait SystemLookup {
    /// Display name, `"Unknown"` when the system cannot be resolved or its
    /// id is reserved
    fn system_name(&self, id: NodeId) -> String;

    /// Full details; `None` is a recoverable miss. Not filtered by the
    /// reserved-id guard.
    fn system_details(&self, id: NodeId) -> Option<SystemInfo>;
}

/// In-memory system cache
#[derive(Debug, Clone, Default)]
pub struct SystemDirectory {
    by_id: HashMap<NodeId, SystemInfo>,
    by_name: HashMap<String, NodeId>,
}

impl SystemDirectory {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let directory = Self::from_json(&json)?;
        info!("Loaded {} systems into directory from {}", directory.len(), path.display());
        Ok(directory)
    }

    /// Parse the cache format: a JSON object keyed by system id strings
    ///
    /// Keys that are not integers and entries that are not system objects
    /// are skipped; null or missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let mut directory = Self::default();
        for (key, info) in decode_map::<SystemInfo>("system", raw) {
            if let Ok(id) = key.trim().parse::<NodeId>() {
                directory.insert(id, info);
            }
        }
        Ok(directory)
    }

    pub fn insert(&mut self, id: NodeId, info: SystemInfo) {
        self.by_name.insert(info.name.to_lowercase(), id);
        self.by_id.insert(id, info);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Case-insensitive name to id lookup
    pub fn resolve_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Closest known system name for a misspelled one
    pub fn suggest(&self, name: &str) -> Option<String> {
        suggest_correction(name.trim(), self.by_id.values().map(|info| info.name.as_str()))
    }

    /// Resolve a system given either its name or its numeric id
    pub fn resolve(&self, input: &str) -> Result<NodeId> {
        if input.trim().is_empty() {
            return Err(Error::InvalidInput("system name is empty".to_string()));
        }
        if let Ok(id) = input.trim().parse::<NodeId>() {
            return Ok(id);
        }
        self.resolve_name(input).ok_or_else(|| Error::UnknownSystem {
            name: input.to_string(),
            suggestion: self.suggest(input),
        })
    }
}

impl SystemLookup for SystemDirectory {
    fn system_name(&self, id: NodeId) -> String {
        if id < RESERVED_NODE_THRESHOLD {
            return UNKNOWN_SYSTEM.to_string();
        }
        self.by_id
            .get(&id)
            .map(|info| info.name.clone())
            .unwrap_or_else(|| UNKNOWN_SYSTEM.to_string())
    }

    fn system_details(&self, id: NodeId) -> Option<SystemInfo> {
        self.by_id.get(&id).cloned()
    }
}

/// Per-system activity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCounters {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ship_kills: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub npc_kills: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pod_kills: u32,
}

#[derive(Debug, Deserialize)]
struct SystemKills {
    system_id: NodeId,
    #[serde(flatten)]
    counters: ActivityCounters,
}

/// Activity statistics keyed by system
#[derive(Debug, Clone, Default)]
pub struct ActivityTable {
    counters: HashMap<NodeId, ActivityCounters>,
}

impl ActivityTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        info!("Loaded activity for {} systems from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a JSON array of `{system_id, ship_kills, npc_kills, pod_kills}`
    ///
    /// A later entry for the same system replaces an earlier one. Entries
    /// without a usable `system_id` are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<Value> = serde_json::from_str(json)?;
        let entries: Vec<SystemKills> = decode_list("activity entry", raw);
        Ok(entries
            .into_iter()
            .map(|entry| (entry.system_id, entry.counters))
            .collect())
    }

    pub fn insert(&mut self, id: NodeId, counters: ActivityCounters) {
        self.counters.insert(id, counters);
    }

    /// Counters for `id`, zero when absent
    pub fn get(&self, id: NodeId) -> ActivityCounters {
        self.counters.get(&id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl FromIterator<(NodeId, ActivityCounters)> for ActivityTable {
    fn from_iter<I: IntoIterator<Item = (NodeId, ActivityCounters)>>(iter: I) -> Self {
        Self {
            counters: iter.into_iter().collect(),
        }
    }
}
