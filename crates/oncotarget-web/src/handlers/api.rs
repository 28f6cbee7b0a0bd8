//! JSON API: current snapshot and refresh trigger.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use oncotarget_common::EnrichmentSnapshot;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::state::SharedState;

/// GET /api/targets - the latest enrichment snapshot
pub async fn api_targets(State(state): State<SharedState>) -> Result<Json<EnrichmentSnapshot>, ApiError> {
    let snapshot = state.snapshot().await.ok_or(ApiError::NotReady)?;
    Ok(Json(snapshot.as_ref().clone()))
}

/// POST /api/refresh - start a new enrichment run in the background
pub async fn api_refresh(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    if !state.spawn_enrichment() {
        return Err(ApiError::Conflict("An enrichment run is already in progress".to_string()));
    }
    info!("Enrichment refresh requested");
    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "started" }))))
}
