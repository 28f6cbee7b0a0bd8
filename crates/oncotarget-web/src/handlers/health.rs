//! Liveness and readiness checks.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::state::SharedState;

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// GET /health/ready - 200 once a snapshot has been published
pub async fn ready(State(state): State<SharedState>) -> impl IntoResponse {
    match state.snapshot().await {
        Some(snapshot) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "completed_at": snapshot.completed_at,
                "refreshing": state.is_running(),
            })),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "enriching", "running": state.is_running() })),
        ),
    }
}
