//! Server-Sent Events endpoint for operator notifications

use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

use crate::{AppState, MODULE_NAME};

/// GET /api/events
///
/// Streams notifications (entry created, entry deleted, failures) and a
/// periodic heartbeat.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    portwatch_common::sse::create_notification_sse_stream(MODULE_NAME, &state.notifications)
}
