//! Chat-ops webhook notifications.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::adapters::retry::RetryPolicy;
use crate::ports::{NotificationError, NotificationSink};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Posts notifications as `{"text": ...}` JSON, retrying failed deliveries.
#[derive(Debug, Clone)]
pub struct WebhookNotificationSink {
    client: Client,
    url: String,
    retry: RetryPolicy,
}

impl WebhookNotificationSink {
    pub fn new(url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            retry,
        }
    }

    async fn post(&self, message: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { text: message })
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for WebhookNotificationSink {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.retry.execute(|| self.post(message)).await?;
        debug!("Webhook notification sent");
        Ok(())
    }
}
