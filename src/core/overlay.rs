//! Overlay ingestion
//!
//! Converts live connection feeds into [`Link`] records for
//! [`Snapshot::install_overlay`](crate::core::topology::Snapshot::install_overlay).
//! Ingestion is best-effort: a record that does not decode, has a missing
//! partner signature, an unparsable system id or a reserved endpoint is
//! dropped and the rest of the feed is still used.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::Result;
use crate::core::feed::{decode_list, decode_map, null_as_default};
use crate::core::topology::{NodeId, Weight, RESERVED_NODE_THRESHOLD};

/// Cost assigned to every wormhole link
pub const WORMHOLE_COST: Weight = 1;

/// A connection between two systems, installed in both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: Weight,
}

/// One side of a scanned wormhole
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "signatureID")]
    pub signature_id: Option<String>,
    #[serde(rename = "systemID", deserialize_with = "null_as_default")]
    pub system_id: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    pub name: Option<String>,
    #[serde(rename = "lifeTime", deserialize_with = "null_as_default")]
    pub life_time: String,
    #[serde(rename = "lifeLeft", deserialize_with = "null_as_default")]
    pub life_left: String,
    #[serde(rename = "createdByID", deserialize_with = "null_as_default")]
    pub created_by_id: String,
    #[serde(rename = "createdByName", deserialize_with = "null_as_default")]
    pub created_by_name: String,
    #[serde(rename = "modifiedByID", deserialize_with = "null_as_default")]
    pub modified_by_id: String,
    #[serde(rename = "modifiedByName", deserialize_with = "null_as_default")]
    pub modified_by_name: String,
    #[serde(rename = "modifiedTime", deserialize_with = "null_as_default")]
    pub modified_time: String,
    #[serde(rename = "maskID", deserialize_with = "null_as_default")]
    pub mask_id: String,
}

/// Pairing of two signatures into a wormhole
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wormhole {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "initialID", deserialize_with = "null_as_default")]
    pub initial_id: String,
    #[serde(rename = "secondaryID", deserialize_with = "null_as_default")]
    pub secondary_id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub parent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub life: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mass: String,
    #[serde(rename = "maskID", deserialize_with = "null_as_default")]
    pub mask_id: String,
}

/// Mapping-tool payload: signatures keyed by id, wormholes referencing them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignatureFeed {
    pub signatures: BTreeMap<String, Signature>,
    pub wormholes: BTreeMap<String, Wormhole>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSignatureFeed {
    #[serde(deserialize_with = "null_as_default")]
    signatures: BTreeMap<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    wormholes: BTreeMap<String, Value>,
}

impl SignatureFeed {
    /// Decode a feed payload; records that do not fit are dropped one by one
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSignatureFeed = serde_json::from_str(json)?;
        Ok(Self {
            signatures: decode_map("signature", raw.signatures),
            wormholes: decode_map("wormhole", raw.wormholes),
        })
    }
}

/// Directly reported connection with both endpoints resolved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_by_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_by_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expires_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remaining_hours: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub signature_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wh_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub max_ship_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub wh_exits_outward: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub out_system_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub out_system_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub out_signature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub in_system_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub in_system_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub in_signature: String,
}

impl Connection {
    /// Decode a JSON array of connections; entries that do not fit are dropped
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        let raw: Vec<Value> = serde_json::from_str(json)?;
        Ok(decode_list("connection", raw))
    }
}

/// Counts of records kept and dropped while building an overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub links: usize,
    pub dropped: usize,
}

/// Map an identifier to a routable node, rejecting reserved and out-of-range ids
fn routable(id: i64) -> Option<NodeId> {
    NodeId::try_from(id)
        .ok()
        .filter(|&id| id >= RESERVED_NODE_THRESHOLD)
}

fn routable_str(id: &str) -> Option<NodeId> {
    id.trim().parse::<i64>().ok().and_then(routable)
}

/// Extract links from signature pairs
pub fn links_from_signatures(feed: &SignatureFeed, report: &mut IngestReport) -> Vec<Link> {
    let mut links = Vec::with_capacity(feed.wormholes.len());

    for (key, wormhole) in &feed.wormholes {
        let (Some(initial), Some(secondary)) = (
            feed.signatures.get(&wormhole.initial_id),
            feed.signatures.get(&wormhole.secondary_id),
        ) else {
            debug!("Dropping wormhole {key}: missing paired signature");
            report.dropped += 1;
            continue;
        };

        match (routable_str(&initial.system_id), routable_str(&secondary.system_id)) {
            (Some(from), Some(to)) => {
                links.push(Link {
                    from,
                    to,
                    cost: WORMHOLE_COST,
                });
                report.links += 1;
            }
            _ => {
                debug!(
                    "Dropping wormhole {key}: unusable systems '{}' -> '{}'",
                    initial.system_id, secondary.system_id
                );
                report.dropped += 1;
            }
        }
    }

    links
}

/// Extract links from directly reported connections
pub fn links_from_connections(connections: &[Connection], report: &mut IngestReport) -> Vec<Link> {
    connections
        .iter()
        .filter_map(|conn| match (routable(conn.out_system_id), routable(conn.in_system_id)) {
            (Some(from), Some(to)) => {
                report.links += 1;
                Some(Link {
                    from,
                    to,
                    cost: WORMHOLE_COST,
                })
            }
            _ => {
                debug!(
                    "Dropping connection {}: unusable systems {} -> {}",
                    conn.id, conn.out_system_id, conn.in_system_id
                );
                report.dropped += 1;
                None
            }
        })
        .collect()
}

/// Gathers links from every available feed for one request
#[derive(Debug, Default)]
pub struct OverlayBuilder {
    links: Vec<Link>,
    report: IngestReport,
}

impl OverlayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signature_feed(mut self, feed: &SignatureFeed) -> Self {
        let links = links_from_signatures(feed, &mut self.report);
        self.links.extend(links);
        self
    }

    pub fn with_connections(mut self, connections: &[Connection]) -> Self {
        let links = links_from_connections(connections, &mut self.report);
        self.links.extend(links);
        self
    }

    /// Add links that were already validated elsewhere
    pub fn with_links<I: IntoIterator<Item = Link>>(mut self, links: I) -> Self {
        let before = self.links.len();
        self.links.extend(links);
        self.report.links += self.links.len() - before;
        self
    }

    pub fn report(&self) -> IngestReport {
        self.report
    }

    pub fn build(self) -> Vec<Link> {
        debug!(
            "Built overlay with {} links ({} records dropped)",
            self.report.links, self.report.dropped
        );
        self.links
    }
}
