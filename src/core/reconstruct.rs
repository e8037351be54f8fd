//! Path reconstruction and step decoration
//!
//! Walks the search tree back from the destination, reverses the walk, and
//! attaches a name, security class and activity counters to every system.
//! Decoration never fails: misses fall back to sentinels and zero counters.

use std::fmt;

use serde::Serialize;

use crate::core::directory::{ActivityCounters, ActivityTable, SystemInfo, SystemLookup};
use crate::core::search::SearchTree;
use crate::core::topology::{NodeId, Weight};

/// Name used when a system cannot be resolved
pub const UNKNOWN_SYSTEM: &str = "Unknown";

/// Security bucket derived from a system's security status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityClass {
    HighSec,
    LowSec,
    NullSec,
    /// Security status unavailable
    Unknown,
}

impl SecurityClass {
    /// `>= 0.5` is high-sec, `> 0.0` low-sec, anything else null-sec
    pub fn from_status(status: f64) -> Self {
        if status >= 0.5 {
            SecurityClass::HighSec
        } else if status > 0.0 {
            SecurityClass::LowSec
        } else {
            SecurityClass::NullSec
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityClass::HighSec => "high-sec",
            SecurityClass::LowSec => "low-sec",
            SecurityClass::NullSec => "null-sec",
            SecurityClass::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SecurityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decorated system on a route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    pub node: NodeId,
    pub name: String,
    pub security_status: Option<f64>,
    pub security_class: SecurityClass,
    pub activity: ActivityCounters,
}

/// Ordered route from source to destination, both inclusive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub steps: Vec<PathStep>,
    pub distance: Weight,
}

impl Route {
    /// Number of jumps between the first and last system
    pub fn jumps(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.steps.iter().map(|step| step.node).collect()
    }
}

/// Walk predecessors from `destination` back to `source`
///
/// Returns `None` when the destination was not reached. The result reads
/// source to destination.
pub fn trace_nodes(tree: &SearchTree, source: NodeId, destination: NodeId) -> Option<Vec<NodeId>> {
    if destination != source && tree.predecessor_of(destination).is_none() {
        return None;
    }

    let mut nodes = vec![destination];
    let mut current = destination;
    while current != source {
        current = tree.predecessor_of(current)?;
        nodes.push(current);
    }
    nodes.reverse();
    Some(nodes)
}

/// Decorate a single system
pub fn decorate<L: SystemLookup + ?Sized>(
    node: NodeId,
    lookup: &L,
    activity: &ActivityTable,
) -> PathStep {
    let (name, security_status, security_class) = match lookup.system_details(node) {
        Some(SystemInfo {
            name,
            security_status,
            ..
        }) => (
            name,
            Some(security_status),
            SecurityClass::from_status(security_status),
        ),
        None => (lookup.system_name(node), None, SecurityClass::Unknown),
    };

    PathStep {
        node,
        name,
        security_status,
        security_class,
        activity: activity.get(node),
    }
}

/// Turn a search tree into a decorated route, or `None` if unreachable
pub fn reconstruct_path<L: SystemLookup + ?Sized>(
    tree: &SearchTree,
    source: NodeId,
    destination: NodeId,
    lookup: &L,
    activity: &ActivityTable,
) -> Option<Route> {
    let nodes = trace_nodes(tree, source, destination)?;
    let distance = tree.distance_to(destination).unwrap_or(0);

    let steps = nodes
        .into_iter()
        .map(|node| decorate(node, lookup, activity))
        .collect();

    Some(Route { steps, distance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::SystemDirectory;
    use std::collections::HashMap;

    fn tree_with(source: NodeId, edges: &[(NodeId, NodeId, Weight)]) -> SearchTree {
        let mut tree = SearchTree {
            source,
            distance: HashMap::from([(source, 0)]),
            ..Default::default()
        };
        for &(prev, node, dist) in edges {
            tree.predecessor.insert(node, prev);
            tree.distance.insert(node, dist);
        }
        tree
    }

    fn directory() -> SystemDirectory {
        SystemDirectory::from_json(
            r#"{
                "30000142": {"name": "Jita", "security_status": 0.9459, "system_id": 30000142},
                "30000144": {"name": "Perimeter", "security_status": 0.3, "system_id": 30000144},
                "30000145": {"name": "New Caldari", "security_status": -0.2, "system_id": 30000145}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_security_class_thresholds() {
        assert_eq!(SecurityClass::from_status(0.5), SecurityClass::HighSec);
        assert_eq!(SecurityClass::from_status(0.3), SecurityClass::LowSec);
        assert_eq!(SecurityClass::from_status(-0.2), SecurityClass::NullSec);
        assert_eq!(SecurityClass::from_status(0.0), SecurityClass::NullSec);
        assert_eq!(SecurityClass::from_status(1.0).to_string(), "high-sec");
        assert_eq!(SecurityClass::from_status(0.1).to_string(), "low-sec");
        assert_eq!(SecurityClass::from_status(-1.0).to_string(), "null-sec");
    }

    #[test]
    fn test_trace_nodes_reverses_walk() {
        let tree = tree_with(1, &[(1, 2, 1), (2, 3, 2), (3, 4, 3)]);
        assert_eq!(trace_nodes(&tree, 1, 4), Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_same_source_and_destination() {
        let tree = tree_with(30000142, &[]);
        let route =
            reconstruct_path(&tree, 30000142, 30000142, &directory(), &ActivityTable::default())
                .unwrap();

        assert_eq!(route.nodes(), vec![30000142]);
        assert_eq!(route.distance, 0);
        assert_eq!(route.jumps(), 0);
    }

    #[test]
    fn test_missing_predecessor_is_no_route() {
        let tree = tree_with(30000142, &[(30000142, 30000144, 1)]);
        let route =
            reconstruct_path(&tree, 30000142, 30000145, &directory(), &ActivityTable::default());
        assert!(route.is_none());
    }

    #[test]
    fn test_steps_are_decorated() {
        let tree = tree_with(
            30000142,
            &[(30000142, 30000144, 1), (30000144, 30000145, 2), (30000145, 31000005, 3)],
        );
        let activity = ActivityTable::from_json(
            r#"[{"system_id": 30000144, "ship_kills": 4, "npc_kills": 120, "pod_kills": 1}]"#,
        )
        .unwrap();

        let route = reconstruct_path(&tree, 30000142, 31000005, &directory(), &activity).unwrap();
        assert_eq!(route.distance, 3);
        assert_eq!(route.jumps(), 3);

        let names: Vec<&str> = route.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Jita", "Perimeter", "New Caldari", UNKNOWN_SYSTEM]);

        let classes: Vec<SecurityClass> = route.steps.iter().map(|s| s.security_class).collect();
        assert_eq!(
            classes,
            vec![
                SecurityClass::HighSec,
                SecurityClass::LowSec,
                SecurityClass::NullSec,
                SecurityClass::Unknown
            ]
        );

        assert_eq!(route.steps[1].activity.ship_kills, 4);
        assert_eq!(route.steps[1].activity.npc_kills, 120);
        assert_eq!(route.steps[0].activity, ActivityCounters::default());
        assert_eq!(route.steps[3].security_status, None);
    }
}
