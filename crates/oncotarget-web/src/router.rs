//! Axum router — maps all URL paths to handlers.

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use crate::state::SharedState;
use crate::handlers::{
    targets::targets_page,
    api::{api_targets, api_refresh},
    health::{health, ready},
};
use crate::sse::sse_handler;

/// Build and return the full Axum router.
pub fn build_router(state: SharedState, static_dir: &Path) -> Router {
    Router::new()
        // Pages
        .route("/",             get(targets_page))

        // Probes
        .route("/health",       get(health))
        .route("/health/ready", get(ready))

        // SSE streaming
        .route("/api/events",   get(sse_handler))

        // API endpoints
        .route("/api/targets",  get(api_targets))
        .route("/api/refresh",  post(api_refresh))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
