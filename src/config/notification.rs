//! Operator notification configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where batch summaries are posted
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Webhook receiving `{"text": ...}` posts; unset logs summaries instead
    pub webhook_url: Option<String>,

    /// Delivery attempts per notification
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit between attempts, in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl NotificationConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// The webhook URL, if one is set and non-blank
    pub fn webhook(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.webhook() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl("notification.webhook_url"));
            }
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidAttempts("notification.max_attempts"));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_delay() -> u64 {
    500
}
