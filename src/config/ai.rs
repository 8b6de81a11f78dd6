//! AI provider configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;
use crate::ports::ProviderMode;

/// AI provider configuration
#[derive(Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI-compatible API key; absent or blank selects the mock provider
    pub openai_api_key: Option<String>,

    /// Model name sent with every completion
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Attempts per generation, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit between attempts, in milliseconds
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,

    /// Use the mock provider even when a key is present
    #[serde(default)]
    pub force_mock: bool,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get retry backoff unit as Duration
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Resolve which provider runs. Decided once at startup.
    pub fn provider_mode(&self) -> ProviderMode {
        if self.force_mock || !self.has_api_key() {
            ProviderMode::Mock
        } else {
            ProviderMode::Live
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidAttempts("ai.max_attempts"));
        }
        if self.provider_mode() == ProviderMode::Live && !self.base_url.starts_with("http") {
            return Err(ValidationError::InvalidUrl("ai.base_url"));
        }
        Ok(())
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("force_mock", &self.force_mock)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay(),
            force_mock: false,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_base_delay(), Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_selects_mock() {
        assert_eq!(AiConfig::default().provider_mode(), ProviderMode::Mock);

        let blank = AiConfig {
            openai_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.provider_mode(), ProviderMode::Mock);
    }

    #[test]
    fn test_key_selects_live_unless_forced() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        };
        assert_eq!(config.provider_mode(), ProviderMode::Live);

        let forced = AiConfig {
            force_mock: true,
            ..config
        };
        assert_eq!(forced.provider_mode(), ProviderMode::Mock);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AiConfig {
            openai_api_key: Some("sk-very-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let config = AiConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
