//! # Short-circuit Library
//!
//! Shortest routes across a static stargate network merged with short-lived
//! wormhole connections.
//!
//! The base topology is loaded once and shared read-only. Every route request
//! gets its own snapshot with a private overlay of wormhole links, so any
//! number of requests can run concurrently with different overlays and no
//! locking.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use short_circuit::{ActivityTable, OverlayBuilder, RouteEngine, SignatureFeed, SystemDirectory, Topology};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = RouteEngine::new(Topology::load_path("mapSolarSystemJumps.csv")?);
//!     let directory = SystemDirectory::load("systems.json")?;
//!     let activity = ActivityTable::load("kills.json").unwrap_or_default();
//!
//!     let feed = SignatureFeed::from_json(&std::fs::read_to_string("wingspan.json")?)?;
//!     let links = OverlayBuilder::new().with_signature_feed(&feed).build();
//!
//!     let from = directory.resolve("Jita")?;
//!     let to = directory.resolve("Amarr")?;
//!     match engine.plan(from, to, &links, &directory, &activity) {
//!         Some(route) => println!("{} jumps", route.jumps()),
//!         None => println!("no route"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;

pub use crate::config::EngineConfig;
pub use crate::core::error::{Error, Result};
pub use crate::core::{
    shortest_path, ActivityCounters, ActivityTable, Connection, ConnectionInfo, Edge,
    IngestReport, Link, LoadReport, NodeId, OverlayBuilder, PathStep, Route, RouteEngine,
    ScoutScore, SearchTree, SecurityClass, SignatureFeed, Snapshot, SystemDirectory, SystemInfo,
    SystemLookup, Topology, Weight,
};
pub use crate::core::topology::RESERVED_NODE_THRESHOLD;
