//! Scripted text-completion double.
//!
//! Replays queued completions and errors in order, recording every request,
//! so the live content provider can be exercised without a network.
//!
//! # Example
//!
//! ```ignore
//! let completion = ScriptedCompletion::new()
//!     .with_error(AIError::unavailable("503"))
//!     .with_response(r#"{"title": "..."}"#);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo, TextCompletion,
    TokenUsage,
};

/// A queued outcome.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Success {
        content: String,
        finish_reason: FinishReason,
    },
    Error(AIError),
}

/// Text completion that replays a script.
#[derive(Debug, Clone)]
pub struct ScriptedCompletion {
    responses: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
    info: ProviderInfo,
}

impl Default for ScriptedCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            info: ProviderInfo::new("scripted", "scripted-model-1"),
        }
    }

    /// Queues a successful completion that finished cleanly.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_finish(content, FinishReason::Stop)
    }

    /// Queues a successful completion with an explicit finish reason.
    pub fn with_finish(self, content: impl Into<String>, finish_reason: FinishReason) -> Self {
        lock(&self.responses).push_back(ScriptedResponse::Success {
            content: content.into(),
            finish_reason,
        });
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.responses).push_back(ScriptedResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// All requests received.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.responses).pop_front();
        match next {
            Some(ScriptedResponse::Success {
                content,
                finish_reason,
            }) => Ok(CompletionResponse {
                usage: TokenUsage::new(10, (content.len() / 4) as u32),
                content,
                model: self.info.model.clone(),
                finish_reason,
            }),
            Some(ScriptedResponse::Error(err)) => Err(err),
            None => Err(AIError::unavailable("script exhausted")),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
