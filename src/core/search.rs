//! Single-source shortest path over a snapshot
//!
//! Label-setting Dijkstra with lazy deletion: a node may sit in the queue
//! several times, and any entry popped after the node is settled is ignored.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::debug;

use crate::core::topology::{NodeId, Snapshot, Weight};

/// Min-priority queue keyed by tentative distance
///
/// Only push and pop are exposed. Entries with equal distance come out in
/// node id order; callers must not depend on that.
#[derive(Debug, Default)]
pub struct MinQueue {
    heap: BinaryHeap<Reverse<(Weight, NodeId)>>,
}

impl MinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: NodeId, distance: Weight) {
        self.heap.push(Reverse((distance, node)));
    }

    /// Remove the entry with the smallest distance
    pub fn pop(&mut self) -> Option<(NodeId, Weight)> {
        self.heap.pop().map(|Reverse((distance, node))| (node, distance))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Shortest-path tree rooted at the search source
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    pub source: NodeId,
    /// Best known distance for every reached node
    pub distance: HashMap<NodeId, Weight>,
    /// Previous hop on the best path for every reached node except the source
    pub predecessor: HashMap<NodeId, NodeId>,
    /// Nodes popped and expanded before the search stopped
    pub settled: usize,
}

impl SearchTree {
    pub fn distance_to(&self, node: NodeId) -> Option<Weight> {
        self.distance.get(&node).copied()
    }

    pub fn predecessor_of(&self, node: NodeId) -> Option<NodeId> {
        self.predecessor.get(&node).copied()
    }

    /// Whether a path from the source to `node` was found
    pub fn reached(&self, node: NodeId) -> bool {
        node == self.source || self.predecessor.contains_key(&node)
    }
}

/// Run Dijkstra from `source` over base and overlay edges of `snapshot`
///
/// `destination` is only an early-exit hint: the search stops once it is
/// settled, leaving unexpanded nodes out of the tree. With `None` every node
/// reachable from `source` is covered.
pub fn shortest_path(
    snapshot: &Snapshot,
    source: NodeId,
    destination: Option<NodeId>,
) -> SearchTree {
    let mut tree = SearchTree {
        source,
        ..Default::default()
    };
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue = MinQueue::new();

    tree.distance.insert(source, 0);
    queue.push(source, 0);

    while let Some((u, dist_u)) = queue.pop() {
        if !visited.insert(u) {
            continue; // Stale entry
        }
        tree.settled += 1;

        if Some(u) == destination {
            break;
        }

        for edge in snapshot.neighbors(u) {
            let candidate = dist_u.saturating_add(edge.weight);
            let improves = tree
                .distance
                .get(&edge.to)
                .map_or(true, |&known| candidate < known);

            if improves {
                tree.distance.insert(edge.to, candidate);
                tree.predecessor.insert(edge.to, u);
                queue.push(edge.to, candidate);
            }
        }
    }

    debug!(
        "Search from {source} settled {} nodes, reached {}",
        tree.settled,
        tree.distance.len()
    );
    tree
}
