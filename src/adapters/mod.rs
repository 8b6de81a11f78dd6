//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Live and mock content providers
//! - `http` - Axum REST API
//! - `memory` - In-memory persistence
//! - `notification` - Webhook and log sinks
//! - `research` - Research sources
//! - `retry` - Shared retry policy for outbound calls

pub mod ai;
pub mod http;
pub mod memory;
pub mod notification;
pub mod research;
pub mod retry;

pub use retry::RetryPolicy;
