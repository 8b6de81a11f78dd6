//! Notification Adapters
//!
//! - `WebhookNotificationSink` - Posts `{"text": ...}` to a chat-ops webhook
//! - `LoggingNotificationSink` - Writes notifications to the trace log

mod logging;
mod webhook;

pub use logging::LoggingNotificationSink;
pub use webhook::WebhookNotificationSink;
