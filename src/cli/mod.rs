//! CLI-specific utilities for short-circuit
//!
//! Input gathering and text rendering for the command-line front end,
//! kept apart from the core library.

pub mod inputs;
pub mod render;

pub use inputs::{load_activity, load_directory, Feeds};
pub use render::{render_connections, render_leaderboard, render_route, render_stats};
