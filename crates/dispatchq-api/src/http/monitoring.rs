//! Probe endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process can answer.
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    /// Deliveries waiting in any queue.
    pub pending: usize,
    /// Deliveries held in the processed history.
    pub processed: usize,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.store.stats();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime().as_secs(),
        pending: stats.pending.total,
        processed: stats.processed,
    })
}

/// GET /livez
///
/// Never touches the store.
pub async fn liveness_probe() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}
