//! Server-Sent Events (SSE) utilities
//!
//! Streams operator notifications to connected pages, with a heartbeat so the
//! page can show connection status.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::notify::NotificationBus;

/// Interval between heartbeat comments
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// Create an SSE stream of notifications from `bus`
///
/// Sends a `ConnectionStatus` event first, then one `Notification` event per
/// published notification. A lagging client skips the notifications it missed
/// rather than being disconnected.
///
/// # Example
/// ```rust,ignore
/// pub async fn event_stream(
///     State(state): State<AppState>,
/// ) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
///     portwatch_common::sse::create_notification_sse_stream("portwatch-review", &state.notifications)
/// }
/// ```
pub fn create_notification_sse_stream(
    service_name: &'static str,
    bus: &NotificationBus,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to {} notifications", service_name);
    let mut rx = bus.subscribe();

    let stream = async_stream::stream! {
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            match rx.recv().await {
                Ok(notification) => {
                    match serde_json::to_string(&notification) {
                        Ok(data) => yield Ok(Event::default().event("Notification").data(data)),
                        Err(e) => warn!("SSE: failed to encode notification: {}", e),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!("SSE: client lagged, skipped {} notifications", skipped);
                }
                Err(RecvError::Closed) => {
                    info!("SSE: {} notification bus closed", service_name);
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}
