//! Notification sink that only logs.

use async_trait::async_trait;
use tracing::info;

use crate::ports::{NotificationError, NotificationSink};

/// Used when no webhook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        info!(notification = %message, "Notification");
        Ok(())
    }
}
