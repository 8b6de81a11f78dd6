//! NotificationSink port - fire-and-forget operator messages.

use async_trait::async_trait;
use thiserror::Error;

/// Destination for short operational messages (chat-ops webhook, log, ...).
///
/// Callers treat delivery as best effort: errors are logged, never surfaced.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
}

/// Notification delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),

    #[error("notification rejected with status {status}")]
    Rejected { status: u16 },
}
