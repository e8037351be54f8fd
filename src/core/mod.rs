//! Core routing modules for short-circuit
//!
//! Topology store, overlay ingestion, search, path reconstruction, the
//! decoration services they rely on, and feed listings.

pub mod directory;
pub mod engine;
pub mod error;
mod feed;
pub mod listing;
pub mod overlay;
pub mod reconstruct;
pub mod search;
pub mod topology;

pub use directory::{ActivityCounters, ActivityTable, SystemDirectory, SystemInfo, SystemLookup};
pub use engine::RouteEngine;
pub use listing::{ConnectionInfo, ScoutScore};
pub use overlay::{Connection, IngestReport, Link, OverlayBuilder, SignatureFeed};
pub use reconstruct::{PathStep, Route, SecurityClass};
pub use search::{shortest_path, SearchTree};
pub use topology::{Edge, LoadReport, NodeId, Snapshot, Topology, Weight};
