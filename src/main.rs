//! # Short-circuit CLI
//!
//! Command-line front end for the short-circuit routing library.
//! Loads the stargate table once, overlays wormhole feeds read from disk, and
//! prints the shortest route between two systems.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use short_circuit::core::listing::{list_direct_connections, list_signature_connections, scout_leaderboard};
use short_circuit::{EngineConfig, LoadReport, RouteEngine, Topology};

mod cli;

/// Command-line interface for short-circuit
#[derive(Parser)]
#[command(name = "short-circuit")]
#[command(about = "Shortest routes across stargates and live wormhole connections")]
#[command(long_about = "Plans routes over the static stargate network merged with wormholes:
  short-circuit route Jita Amarr                            # Stargates only
  short-circuit route Jita Amarr --signatures wingspan.json # With scanned wormholes
  short-circuit route 30000142 31000005 --connections thera.json --json
  short-circuit stats                                       # Topology diagnostics
  short-circuit connections --signatures wingspan.json      # Known wormholes and scouts")]
#[command(version = env!("SHORT_CIRCUIT_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    sources: SourceArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest route between two systems
    Route {
        /// Start system name or id
        from: String,
        /// Destination system name or id
        to: String,
        /// Print the route as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load the topology and print diagnostics
    Stats,
    /// List known wormhole connections and rank the scouts who found them
    Connections {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Input files, each overriding the configuration file
#[derive(Args, Default)]
struct SourceArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Stargate jump table (CSV)
    #[arg(long, global = true)]
    topology: Option<PathBuf>,

    /// System cache (JSON)
    #[arg(long, global = true)]
    systems: Option<PathBuf>,

    /// Kill statistics (JSON)
    #[arg(long, global = true)]
    activity: Option<PathBuf>,

    /// Signature/wormhole pair feed (JSON), may be repeated
    #[arg(long = "signatures", global = true)]
    signature_feeds: Vec<PathBuf>,

    /// Direct connection feed (JSON), may be repeated
    #[arg(long = "connections", global = true)]
    connection_feeds: Vec<PathBuf>,
}

/// Merge CLI flags over the configuration file and defaults
fn resolve_config(args: &SourceArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(path) = &args.topology {
        config.topology_path = path.clone();
    }
    if let Some(path) = &args.systems {
        config.systems_path = path.clone();
    }
    if let Some(path) = &args.activity {
        config.activity_path = path.clone();
    }
    config.signature_feeds.extend(args.signature_feeds.iter().cloned());
    config.connection_feeds.extend(args.connection_feeds.iter().cloned());

    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_topology(config: &EngineConfig) -> Result<(Topology, LoadReport)> {
    let start = Instant::now();
    let loaded = Topology::load_path_with_report(&config.topology_path)
        .context("Could not load stargate map")?;
    info!("Topology ready in {:.2}s", start.elapsed().as_secs_f64());
    Ok(loaded)
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.sources)?;

    match cli.command {
        Commands::Stats => {
            let (topology, report) = load_topology(&config)?;
            print!("{}", cli::render_stats(&topology, &report));
        }
        Commands::Connections { json } => {
            let directory = cli::load_directory(&config.systems_path);
            let feeds = cli::Feeds::load(&config.signature_feeds, &config.connection_feeds);

            let mut connections: Vec<_> = feeds
                .signatures
                .iter()
                .flat_map(|feed| list_signature_connections(feed, &directory))
                .collect();
            connections.extend(list_direct_connections(&feeds.connections));
            let leaderboard = scout_leaderboard(&feeds.signatures);

            if json {
                let listing = serde_json::json!({
                    "connections": connections,
                    "leaderboard": leaderboard,
                });
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print!("{}", cli::render_connections(&connections));
                print!("{}", cli::render_leaderboard(&leaderboard));
            }
        }
        Commands::Route { from, to, json } => {
            let (topology, _) = load_topology(&config)?;
            let engine = RouteEngine::new(topology);
            let directory = cli::load_directory(&config.systems_path);
            let activity = cli::load_activity(&config.activity_path);
            let links = cli::Feeds::load(&config.signature_feeds, &config.connection_feeds).overlay();

            let from_id = directory.resolve(&from)?;
            let to_id = directory.resolve(&to)?;

            let start = Instant::now();
            let route = engine.plan(from_id, to_id, &links, &directory, &activity);
            info!(
                "Planned {from} -> {to} with {} wormholes in {:.3}s",
                links.len(),
                start.elapsed().as_secs_f64()
            );

            match route {
                Some(route) if json => println!("{}", serde_json::to_string_pretty(&route)?),
                Some(route) => print!("{}", cli::render_route(&route)),
                None => println!("No route found from {from} to {to}"),
            }
        }
    }

    Ok(())
}
