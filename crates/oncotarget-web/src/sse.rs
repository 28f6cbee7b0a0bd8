//! Server-Sent Events (SSE) stream of enrichment progress.
//!
//! Each event is named after its kind (`enrichment_started`, `target_enriched`,
//! `enrichment_completed`) and carries the JSON-encoded [`AppEvent`].

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::{AppEvent, SharedState};

/// GET /api/events
pub async fn sse_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Lagged receivers just skip what they missed
    let stream = BroadcastStream::new(state.subscribe())
        .filter_map(|received| received.ok())
        .filter_map(|event| to_sse(&event).map(Ok));

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)).text("ping"))
}

fn to_sse(event: &AppEvent) -> Option<Event> {
    let data = serde_json::to_string(event).ok()?;
    Some(Event::default().event(event.kind()).data(data))
}
