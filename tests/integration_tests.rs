//! Integration tests for short-circuit routing
//!
//! These tests write a small stargate table and feed payloads to a temporary
//! directory and drive the public API end to end.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use short_circuit::core::listing::{list_signature_connections, scout_leaderboard};
use short_circuit::{
    shortest_path, ActivityTable, Connection, Error, Link, LoadReport, OverlayBuilder,
    RouteEngine, SecurityClass, SignatureFeed, SystemDirectory, Topology,
};

const JITA: u32 = 30000142;
const PERIMETER: u32 = 30000144;
const NEW_CALDARI: u32 = 30000145;
const AMARR: u32 = 30002187;
const ASHAB: u32 = 30002188;
const THERA: u32 = 31000005;

const JUMPS_CSV: &str = "\
fromRegionID,fromConstellationID,fromSolarSystemID,toSolarSystemID,toConstellationID,toRegionID
10000002,20000020,30000142,30000144,20000020,10000002
10000002,20000020,30000144,30000145,20000020,10000002
10000002,20000020,30000145,30002188,20000322,10000043
10000043,20000322,30002188,30002187,20000322,10000043
garbage,row
10000043,20000322,30002187,oops,20000322,10000043
";

const SYSTEMS_JSON: &str = r#"{
    "30000142": {"name": "Jita", "security_status": 0.9459, "system_id": 30000142},
    "30000144": {"name": "Perimeter", "security_status": 0.9072, "system_id": 30000144},
    "30000145": {"name": "New Caldari", "security_status": 0.3, "system_id": 30000145},
    "30002187": {"name": "Amarr", "security_status": 1.0, "system_id": 30002187},
    "30002188": {"name": "Ashab", "security_status": -0.1, "system_id": 30002188},
    "31000005": {"name": "Thera", "security_status": -0.99, "system_id": 31000005}
}"#;

const KILLS_JSON: &str = r#"[
    {"system_id": 30000142, "ship_kills": 12, "npc_kills": 0, "pod_kills": 3},
    {"system_id": 31000005, "ship_kills": 2, "npc_kills": 40, "pod_kills": 1}
]"#;

/// Signature pairs Jita <-> Thera and Thera <-> Amarr, plus a half-scanned hole
const WINGSPAN_JSON: &str = r#"{
    "signatures": {
        "s1": {"id": "s1", "signatureID": "ABC123", "systemID": "30000142", "type": "wh", "createdByName": "Scout"},
        "s2": {"id": "s2", "signatureID": "DEF456", "systemID": "31000005", "type": "wh", "createdByName": "Scout"},
        "s3": {"id": "s3", "signatureID": "GHI789", "systemID": "31000005", "type": "wh", "createdByName": "Scout"},
        "s4": {"id": "s4", "signatureID": "JKL012", "systemID": "30002187", "type": "wh", "createdByName": "Scout"},
        "s5": {"id": "s5", "signatureID": null, "systemID": "30000145", "type": "wh"}
    },
    "wormholes": {
        "w1": {"id": "w1", "initialID": "s1", "secondaryID": "s2", "life": "stable"},
        "w2": {"id": "w2", "initialID": "s3", "secondaryID": "s4", "life": "stable"},
        "w3": {"id": "w3", "initialID": "s5", "secondaryID": "s9", "life": "critical"}
    }
}"#;

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn link(from: u32, to: u32) -> Link {
    Link { from, to, cost: 1 }
}

#[test]
fn test_missing_topology_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Topology::load_path(dir.path().join("mapSolarSystemJumps.csv")).unwrap_err();
    assert!(matches!(err, Error::Load { .. }), "unexpected error: {err}");
}

#[test]
fn test_load_from_file_skips_bad_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "jumps.csv", JUMPS_CSV);

    let topology = Topology::load_path(&path).unwrap();
    assert_eq!(topology.size(), 5);
    assert_eq!(topology.edge_count(), 8);
}

#[test]
fn test_load_report_counts_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "jumps.csv", JUMPS_CSV);

    let (topology, report) = Topology::load_path_with_report(&path).unwrap();
    assert_eq!(topology.size(), 5);
    assert_eq!(
        report,
        LoadReport {
            rows_loaded: 4,
            rows_skipped: 2,
            header_skipped: true,
        }
    );
}

#[test]
fn test_three_node_scenario() {
    let engine = RouteEngine::new(Topology::from_links([link(1, 2), link(2, 3)]));
    let directory = SystemDirectory::default();
    let activity = ActivityTable::default();

    let route = engine.plan(1, 3, &[], &directory, &activity).unwrap();
    assert_eq!(route.nodes(), vec![1, 2, 3]);
    assert_eq!(route.distance, 2);

    let route = engine.plan(1, 3, &[link(1, 3)], &directory, &activity).unwrap();
    assert_eq!(route.nodes(), vec![1, 3]);
    assert_eq!(route.distance, 1);
}

#[test]
fn test_route_with_wormhole_feeds() {
    let dir = tempfile::tempdir().unwrap();
    let topology = Topology::load_path(write_fixture(dir.path(), "jumps.csv", JUMPS_CSV)).unwrap();
    let directory = SystemDirectory::load(write_fixture(dir.path(), "systems.json", SYSTEMS_JSON)).unwrap();
    let activity = ActivityTable::load(write_fixture(dir.path(), "kills.json", KILLS_JSON)).unwrap();
    let engine = RouteEngine::new(topology);

    let from = directory.resolve("jita").unwrap();
    let to = directory.resolve("Amarr").unwrap();

    // Stargates only: Jita, Perimeter, New Caldari, Ashab, Amarr
    let route = engine.plan(from, to, &[], &directory, &activity).unwrap();
    assert_eq!(route.nodes(), vec![JITA, PERIMETER, NEW_CALDARI, ASHAB, AMARR]);
    assert_eq!(route.distance, 4);
    let classes: Vec<SecurityClass> = route.steps.iter().map(|s| s.security_class).collect();
    assert_eq!(
        classes,
        vec![
            SecurityClass::HighSec,
            SecurityClass::HighSec,
            SecurityClass::LowSec,
            SecurityClass::NullSec,
            SecurityClass::HighSec
        ]
    );

    // Through Thera once the scanned holes are overlaid
    let feed = SignatureFeed::from_json(WINGSPAN_JSON).unwrap();
    let builder = OverlayBuilder::new().with_signature_feed(&feed);
    assert_eq!(builder.report().dropped, 1);
    let links = builder.build();
    assert_eq!(links.len(), 2);

    let route = engine.plan(from, to, &links, &directory, &activity).unwrap();
    assert_eq!(route.nodes(), vec![JITA, THERA, AMARR]);
    assert_eq!(route.distance, 2);
    assert_eq!(route.steps[0].activity.ship_kills, 12);
    assert_eq!(route.steps[1].name, "Thera");
    assert_eq!(route.steps[1].activity.npc_kills, 40);
    assert_eq!(route.steps[2].activity.ship_kills, 0);
}

#[test]
fn test_connection_feed_reaches_isolated_system() {
    let dir = tempfile::tempdir().unwrap();
    let topology = Topology::load_path(write_fixture(dir.path(), "jumps.csv", JUMPS_CSV)).unwrap();
    let engine = RouteEngine::new(topology);
    let directory = SystemDirectory::from_json(SYSTEMS_JSON).unwrap();
    let activity = ActivityTable::default();

    assert!(engine.plan(JITA, THERA, &[], &directory, &activity).is_none());

    let connections = Connection::list_from_json(
        r#"[{"id": "t1", "out_system_id": 31000005, "in_system_id": 30000145, "remaining_hours": 8}]"#,
    )
    .unwrap();
    let links = OverlayBuilder::new().with_connections(&connections).build();

    let route = engine.plan(JITA, THERA, &links, &directory, &activity).unwrap();
    assert_eq!(route.nodes(), vec![JITA, PERIMETER, NEW_CALDARI, THERA]);
    assert_eq!(route.jumps(), 3);
}

#[test]
fn test_snapshots_do_not_leak_overlays() {
    let topology = Arc::new(Topology::from_links([link(1, 2), link(2, 3), link(3, 4)]));

    let mut request = topology.snapshot();
    request.install_overlay(&[link(1, 4)]);
    assert_eq!(shortest_path(&request, 1, Some(4)).distance_to(4), Some(1));

    let fresh = topology.snapshot();
    assert_eq!(shortest_path(&fresh, 1, Some(4)).distance_to(4), Some(3));
    assert_eq!(fresh.overlay_len(), 0);
}

#[test]
fn test_unknown_system_name_suggests_correction() {
    let directory = SystemDirectory::from_json(SYSTEMS_JSON).unwrap();
    let err = directory.resolve("Perimiter").unwrap_err();
    assert_eq!(err.to_string(), "unknown system 'Perimiter', did you mean 'Perimeter'?");
}

#[test]
fn test_feed_listing_and_leaderboard() {
    let directory = SystemDirectory::from_json(SYSTEMS_JSON).unwrap();
    let feed = SignatureFeed::from_json(WINGSPAN_JSON).unwrap();

    let listed = list_signature_connections(&feed, &directory);
    let pairs: Vec<(&str, &str, &str)> = listed
        .iter()
        .map(|c| (c.from_name.as_str(), c.to_name.as_str(), c.signature_id.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Jita", "Thera", "ABC-123"), ("Thera", "Amarr", "GHI-789")]);

    let board = scout_leaderboard([&feed]);
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].scout, "Scout");
    assert_eq!(board[0].scans, 2);
}
