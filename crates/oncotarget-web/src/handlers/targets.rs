//! Target table page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use crate::error::ApiError;
use crate::state::SharedState;

/// GET / - the enriched target table, or a self-refreshing placeholder until the first run completes.
pub async fn targets_page(State(state): State<SharedState>) -> Result<Response, ApiError> {
    match state.snapshot().await {
        Some(snapshot) => {
            let html = state.templates.render_index(&snapshot)?;
            Ok(Html(html).into_response())
        }
        None => {
            let html = state.templates.render_loading(state.is_running())?;
            Ok((StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response())
        }
    }
}
