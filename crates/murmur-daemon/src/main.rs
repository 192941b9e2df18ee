// crates/murmur-daemon/src/main.rs
//
// Binary entrypoint for the Murmur node daemon.
//
// Initializes tracing, parses CLI arguments, loads configuration,
// constructs the gossip engine and trust sink, and runs the TCP peer
// listener and the HTTP control server until terminated.

mod config;
mod control;
mod listener;
mod relay;
mod shared;
mod sink;

use std::sync::Arc;

use clap::Parser;

use config::NodeConfig;
use murmur_gossip::GossipEngine;
use shared::NodeShared;
use sink::FileTrustSink;

/// Murmur node daemon: gossips values and scores peer trustworthiness.
#[derive(Parser, Debug)]
#[command(name = "murmur-daemon", version = "0.1.0", about = "Murmur gossip node daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.murmur/config.toml")]
    config: String,

    /// Override the configured node id.
    #[arg(long)]
    node_id: Option<i64>,

    /// Run as a faulty (value-corrupting) node.
    #[arg(long)]
    faulty: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration from TOML file, falling back to defaults if the
    // file is not found.
    let config_path = expand_tilde(&args.config);
    let mut config = match NodeConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!(
                "Could not load config from {}: {}. Using defaults.",
                config_path, e
            );
            NodeConfig::default()
        }
    };

    // CLI flags override the config file values.
    if let Some(node_id) = args.node_id {
        config.node_id = node_id;
    }
    if args.faulty {
        config.faulty = true;
    }

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let peers = config.peer_addrs()?;

    tracing::info!("Murmur Daemon v0.1.0");
    tracing::info!("Node id: {}", config.node_id);
    tracing::info!("Gossip endpoint: {}", config.self_addr());
    tracing::info!("Control endpoint: {}:{}", config.host, config.control_port);
    tracing::info!("Peers configured: {}", peers.len());
    if config.faulty {
        tracing::warn!("Running as a FAULTY node: outbound values will be corrupted");
    }

    let engine = GossipEngine::with_dedup_capacity(
        config.node_id,
        config.self_addr(),
        peers,
        config.faulty,
        config.dedup_capacity,
    );
    let sink = Arc::new(FileTrustSink::new(expand_tilde(&config.trust_log_path())));
    let shared = NodeShared::new(engine, sink, config.faulty);

    // Run both servers; neither returns unless it fails to bind or its
    // accept loop dies.
    tokio::select! {
        result = listener::run_gossip_listener(config.gossip_port, shared.clone()) => {
            if let Err(e) = result {
                tracing::error!("gossip listener error: {}", e);
            }
        }
        result = control::run_control_server(config.control_port, shared.clone()) => {
            if let Err(e) = result {
                tracing::error!("control server error: {}", e);
            }
        }
    }

    Ok(())
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &path[1..]);
        }
    }
    path.to_string()
}
