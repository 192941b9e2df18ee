// crates/murmur-daemon/src/control.rs
//
// HTTP control surface: trigger a broadcast, read trust metrics.
//
// POST /send  {"amount": <number>}  -> 200 on broadcast initiation
// GET  /metrics                     -> timestamp, trust scores, node kind
//
// A 200 from /send confirms initiation only; delivery is best-effort.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use murmur_core::MurmurError;

use crate::relay;
use crate::shared::NodeShared;

/// Serve the control endpoints until the process exits.
pub async fn run_control_server(port: u16, shared: NodeShared) -> Result<(), MurmurError> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("control server started on port {}", port);
    axum::serve(listener, router(shared)).await?;
    Ok(())
}

/// Build the control router.
pub fn router(shared: NodeShared) -> Router {
    Router::new()
        .route("/send", post(handle_send))
        .route("/metrics", get(handle_metrics))
        .with_state(shared)
}

/// Response body for GET /metrics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsResponse {
    timestamp: String,
    trust_scores: BTreeMap<String, f64>,
    node_kind: String,
}

/// Handle POST /send: originate a broadcast with the requested amount.
async fn handle_send(
    State(shared): State<NodeShared>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> (StatusCode, &'static str) {
    let amount = body
        .ok()
        .and_then(|Json(value)| value.get("amount").and_then(|v| v.as_f64()));
    let Some(amount) = amount else {
        return (StatusCode::BAD_REQUEST, "Missing 'amount' in request");
    };

    tracing::info!("control request to send amount {}", amount);
    let receipt = {
        let mut engine = shared.engine.lock().await;
        engine.originate(amount)
    };
    relay::broadcast(receipt.outbound);

    (StatusCode::OK, "Message broadcasted successfully")
}

/// Handle GET /metrics: report the current trust table.
async fn handle_metrics(State(shared): State<NodeShared>) -> Json<MetricsResponse> {
    let snapshot = {
        let engine = shared.engine.lock().await;
        engine.trust_scores()
    };
    let trust_scores = snapshot
        .scores
        .into_iter()
        .map(|(peer, score)| (peer.to_string(), score))
        .collect();

    Json(MetricsResponse {
        timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        trust_scores,
        node_kind: if shared.faulty { "faulty" } else { "honest" }.to_string(),
    })
}
