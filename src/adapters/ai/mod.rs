//! AI Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAICompletion` - OpenAI-compatible chat completions over HTTP
//! - `ScriptedCompletion` - Replays queued completions for testing
//! - `LiveContentProvider` - Structured content over any `TextCompletion`
//! - `MockContentProvider` - Deterministic content with no network
//!
//! The live/mock choice is made once at startup by [`build_content_provider`].

mod live_provider;
mod mock_provider;
mod openai_completion;
mod scripted_completion;

pub use live_provider::{confidence_for, LiveContentProvider, BASE_CONFIDENCE, DEFAULT_CALL_TIMEOUT};
pub use mock_provider::{MockContentProvider, MOCK_CONFIDENCE, MOCK_GENERATED_AT_SECS};
pub use openai_completion::{OpenAICompletion, OpenAIConfig};
pub use scripted_completion::{ScriptedCompletion, ScriptedResponse};

use secrecy::Secret;
use std::sync::Arc;
use tracing::info;

use crate::adapters::retry::RetryPolicy;
use crate::config::AiConfig;
use crate::ports::{AIError, ContentProvider, ProviderMode};

/// Builds the content provider selected by configuration.
///
/// Mock when no API key is configured or mock mode is forced.
pub fn build_content_provider(config: &AiConfig) -> Result<Arc<dyn ContentProvider>, AIError> {
    let mode = config.provider_mode();
    let provider: Arc<dyn ContentProvider> = match (mode, config.openai_api_key.as_ref()) {
        (ProviderMode::Live, Some(key)) => {
            let completion = OpenAICompletion::new(
                OpenAIConfig::new(Secret::new(key.clone()))
                    .with_model(config.model.clone())
                    .with_base_url(config.base_url.clone())
                    .with_timeout(config.timeout()),
            )?;
            Arc::new(
                LiveContentProvider::new(Arc::new(completion))
                    .with_retry(RetryPolicy::new(config.max_attempts, config.retry_base_delay()))
                    .with_call_timeout(config.timeout()),
            )
        }
        _ => Arc::new(MockContentProvider::new()),
    };

    info!(mode = %provider.mode(), model = %config.model, "Content provider selected");
    Ok(provider)
}
