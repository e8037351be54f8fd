//! Plain-text output for the CLI commands

use std::fmt::Write;

use short_circuit::{ConnectionInfo, LoadReport, Route, ScoutScore, Topology};

/// Render a route as a numbered table, one system per line
pub fn render_route(route: &Route) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Route: {} jumps (cost {})",
        route.jumps(),
        route.distance
    );

    for (i, step) in route.steps.iter().enumerate() {
        let security = match step.security_status {
            Some(status) => format!("{status:>5.2} {}", step.security_class),
            None => format!("{:>5} {}", "?", step.security_class),
        };
        let _ = writeln!(
            out,
            "{i:>3}. {:<20} {security:<15} ships {:>4}  npcs {:>5}  pods {:>4}",
            step.name, step.activity.ship_kills, step.activity.npc_kills, step.activity.pod_kills
        );
    }

    out
}

/// Topology size and how the load went
pub fn render_stats(topology: &Topology, report: &LoadReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Systems: {}", topology.size());
    let _ = writeln!(out, "Connections: {}", topology.edge_count() / 2);
    let _ = writeln!(out, "Rows loaded: {}", report.rows_loaded);
    let _ = writeln!(out, "Rows skipped: {}", report.rows_skipped);
    let _ = writeln!(
        out,
        "Header row: {}",
        if report.header_skipped { "skipped" } else { "none" }
    );
    out
}

pub fn render_connections(connections: &[ConnectionInfo]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Connections: {}", connections.len());
    for conn in connections {
        let _ = writeln!(
            out,
            "  {:<20} -> {:<20} {:<9} {:<12} {:<16} {}",
            conn.from_name, conn.to_name, conn.signature_id, conn.life, conn.scout, conn.last_updated
        );
    }
    out
}

pub fn render_leaderboard(board: &[ScoutScore]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scouts:");
    for (rank, score) in board.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {:<24} {:>4}", rank + 1, score.scout, score.scans);
    }
    out
}
