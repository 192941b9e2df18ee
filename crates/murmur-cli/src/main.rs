// crates/murmur-cli/src/main.rs
//
// CLI entrypoint for the Murmur operator tools.
//
// Talks to a running murmur-daemon over its HTTP control surface:
// `send` triggers a broadcast, `metrics` prints the trust table.

mod output;

use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Murmur CLI: operator tools for the Murmur gossip network.
#[derive(Parser, Debug)]
#[command(
    name = "murmur",
    version = "0.1.0",
    about = "Murmur CLI: trigger broadcasts and inspect trust scores"
)]
struct Cli {
    /// Control endpoint of the murmur-daemon.
    #[arg(long, global = true, default_value = "http://localhost:9000")]
    control: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Broadcast a value into the gossip network.
    Send {
        /// The numeric value to gossip.
        #[arg(long)]
        amount: f64,
    },

    /// Display the daemon's current trust scores.
    Metrics {
        /// Print raw JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

/// Mirrors the daemon's GET /metrics response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricsResponse {
    timestamp: String,
    trust_scores: BTreeMap<String, f64>,
    node_kind: String,
}

/// One row of the metrics table.
#[derive(Tabled)]
struct TrustRow {
    #[tabled(rename = "Peer")]
    peer: String,
    #[tabled(rename = "Trust")]
    trust: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Send { amount } => send(&cli.control, *amount).await?,
        Commands::Metrics { json } => metrics(&cli.control, *json).await?,
    }

    Ok(())
}

/// POST /send with the given amount and print the daemon's reply.
async fn send(control: &str, amount: f64) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/send", control))
        .json(&serde_json::json!({ "amount": amount }))
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(format!("daemon returned {}: {}", status, body).into());
    }
    println!("{}", body);
    Ok(())
}

/// GET /metrics and print the trust table.
async fn metrics(control: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let resp = reqwest::get(format!("{}/metrics", control)).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("daemon returned {}", status).into());
    }
    let metrics: MetricsResponse = resp.json().await?;

    if json {
        println!("{}", output::format_json(&metrics));
        return Ok(());
    }

    println!("Node kind: {}", metrics.node_kind);
    println!("As of:     {}", metrics.timestamp);
    let rows: Vec<TrustRow> = metrics
        .trust_scores
        .iter()
        .map(|(peer, score)| TrustRow {
            peer: peer.clone(),
            trust: format!("{:.1}", score),
        })
        .collect();
    println!("{}", output::format_table(&rows));
    Ok(())
}
