//! Operator notifications ("toasts")
//!
//! Best-effort, transient messages shown for a fixed duration. Nothing in the
//! filtering path depends on their delivery.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// How long a toast stays on screen before dismissing itself
pub const NOTIFICATION_DURATION_MS: u64 = 3_000;

/// Toast severity, mapped to the page's alert styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Danger,
}

/// A dismissible message for the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration_ms: NOTIFICATION_DURATION_MS,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Danger)
    }
}

/// Broadcast channel fanning notifications out to connected pages
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus buffering up to `capacity` undelivered notifications
    ///
    /// A capacity of 0 is raised to 1; the channel needs room for one value.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Publish a notification; returns how many subscribers received it
    ///
    /// Having no subscribers is not an error: nobody is looking at a page.
    pub fn notify(&self, notification: Notification) -> usize {
        match self.tx.send(notification) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(dropped)) => {
                debug!("No listeners for notification: {}", dropped.message);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults_to_three_seconds() {
        let n = Notification::success("Entry deleted");
        assert_eq!(n.duration_ms, 3_000);
        assert_eq!(n.severity, Severity::Success);
    }

    #[test]
    fn test_notify_without_subscribers_is_ok() {
        let bus = NotificationBus::new(8);
        assert_eq!(bus.notify(Notification::info("hello")), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_notification() {
        let bus = NotificationBus::new(8);
        let mut rx = bus.subscribe();
        assert_eq!(bus.notify(Notification::danger("Delete failed")), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Delete failed");
        assert_eq!(received.severity, Severity::Danger);
    }

    #[tokio::test]
    async fn test_zero_capacity_bus_still_delivers() {
        let bus = NotificationBus::new(0);
        let mut rx = bus.subscribe();
        assert_eq!(bus.notify(Notification::success("Entry created")), 1);
        assert_eq!(rx.recv().await.unwrap().message, "Entry created");
    }

    #[test]
    fn test_severity_wire_format() {
        let json = serde_json::to_string(&Notification::info("x")).unwrap();
        assert!(json.contains(r#""severity":"info""#));
        assert!(json.contains(r#""duration_ms":3000"#));
    }
}
