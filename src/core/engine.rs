//! Per-request route planning over a shared base topology

use std::sync::Arc;

use log::debug;

use crate::core::directory::{ActivityTable, SystemLookup};
use crate::core::overlay::Link;
use crate::core::reconstruct::{reconstruct_path, Route};
use crate::core::search::shortest_path;
use crate::core::topology::{NodeId, Topology};

/// Shared, read-only routing engine
///
/// Cloning is cheap and every clone routes over the same base. Each call to
/// [`RouteEngine::plan`] builds its own snapshot, so concurrent requests with
/// different overlays never see each other's links.
#[derive(Debug, Clone)]
pub struct RouteEngine {
    topology: Arc<Topology>,
}

impl RouteEngine {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology: Arc::new(topology),
        }
    }

    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Shortest decorated route from `from` to `to` with `links` overlaid
    ///
    /// Returns `None` when `to` is not reachable.
    pub fn plan<L: SystemLookup + ?Sized>(
        &self,
        from: NodeId,
        to: NodeId,
        links: &[Link],
        lookup: &L,
        activity: &ActivityTable,
    ) -> Option<Route> {
        let mut snapshot = self.topology.snapshot();
        snapshot.install_overlay(links);
        debug!(
            "Planning {from} -> {to} with {} overlay links over {} systems",
            links.len(),
            snapshot.overlay_len()
        );

        let tree = shortest_path(&snapshot, from, Some(to));
        reconstruct_path(&tree, from, to, lookup, activity)
    }
}
