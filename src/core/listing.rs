//! Connection listing and scout leaderboard
//!
//! Summaries of the overlay feeds for display: one [`ConnectionInfo`] per
//! usable connection, and per-scout scan counts from the signature feed.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::directory::SystemLookup;
use crate::core::overlay::{Connection, SignatureFeed};
use crate::core::reconstruct::UNKNOWN_SYSTEM;
use crate::core::topology::NodeId;

/// Signature id mappers use for holes they have not scanned yet
const PLACEHOLDER_SIGNATURE: &str = "???";

/// One listed wormhole connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionInfo {
    pub from_name: String,
    pub to_name: String,
    pub signature_id: String,
    pub scout: String,
    pub last_updated: String,
    pub life: String,
}

/// Scan count of one scout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoutScore {
    pub scout: String,
    pub scans: usize,
}

/// `ABC123` becomes `ABC-123`; anything not exactly six characters without
/// a dash is returned unchanged
pub fn format_signature_id(id: &str) -> String {
    if id.len() == 6 && id.is_ascii() && !id.contains('-') {
        format!("{}-{}", &id[..3], &id[3..])
    } else {
        id.to_string()
    }
}

fn name_of<L: SystemLookup + ?Sized>(lookup: &L, system_id: &str) -> String {
    match system_id.trim().parse::<NodeId>() {
        Ok(id) => lookup.system_name(id),
        Err(_) => UNKNOWN_SYSTEM.to_string(),
    }
}

/// List the paired wormholes of a signature feed whose endpoints both resolve
pub fn list_signature_connections<L: SystemLookup + ?Sized>(
    feed: &SignatureFeed,
    lookup: &L,
) -> Vec<ConnectionInfo> {
    let mut listed = Vec::new();

    for wormhole in feed.wormholes.values() {
        let (Some(initial), Some(secondary)) = (
            feed.signatures.get(&wormhole.initial_id),
            feed.signatures.get(&wormhole.secondary_id),
        ) else {
            continue;
        };

        let from_name = name_of(lookup, &initial.system_id);
        let to_name = name_of(lookup, &secondary.system_id);
        let signature_id = initial
            .signature_id
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_default();

        if from_name == UNKNOWN_SYSTEM
            || to_name == UNKNOWN_SYSTEM
            || signature_id == PLACEHOLDER_SIGNATURE
        {
            continue;
        }

        listed.push(ConnectionInfo {
            from_name,
            to_name,
            signature_id: format_signature_id(&signature_id),
            scout: initial.created_by_name.clone(),
            last_updated: initial.modified_time.clone(),
            life: wormhole.life.clone(),
        });
    }

    listed
}

/// List directly reported connections as they were published
pub fn list_direct_connections(connections: &[Connection]) -> Vec<ConnectionInfo> {
    connections
        .iter()
        .map(|conn| ConnectionInfo {
            from_name: conn.out_system_name.clone(),
            to_name: conn.in_system_name.clone(),
            signature_id: conn.in_signature.clone(),
            scout: conn.created_by_name.clone(),
            last_updated: conn.created_at.clone(),
            life: format!("{} hours", conn.remaining_hours),
        })
        .collect()
}

/// Rank scouts by how many paired wormholes they scanned
///
/// Every wormhole with both signatures present credits the creator of its
/// initial signature, whether or not it is listed. Ties are ordered by name.
pub fn scout_leaderboard<'a, I>(feeds: I) -> Vec<ScoutScore>
where
    I: IntoIterator<Item = &'a SignatureFeed>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for feed in feeds {
        for wormhole in feed.wormholes.values() {
            let paired = feed.signatures.contains_key(&wormhole.secondary_id);
            match feed.signatures.get(&wormhole.initial_id) {
                Some(initial) if paired && !initial.created_by_name.trim().is_empty() => {
                    *counts.entry(initial.created_by_name.as_str()).or_default() += 1;
                }
                _ => {}
            }
        }
    }

    let mut board: Vec<ScoutScore> = counts
        .into_iter()
        .map(|(scout, scans)| ScoutScore {
            scout: scout.to_string(),
            scans,
        })
        .collect();
    board.sort_by(|a, b| b.scans.cmp(&a.scans).then_with(|| a.scout.cmp(&b.scout)));
    board
}
