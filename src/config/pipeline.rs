//! Refresh pipeline configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::foundation::Amazingness;
use crate::domain::research::ExpiryPolicy;

/// Analysis and refresh tuning
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Trailing window, in days, of content considered by refresh-all
    #[serde(default = "default_refresh_window_days")]
    pub refresh_window_days: i64,

    /// Pause between items in a refresh-all batch, in milliseconds
    #[serde(default = "default_refresh_item_delay")]
    pub refresh_item_delay_ms: u64,

    /// Completions needed before a content item is judged
    #[serde(default = "default_min_completions")]
    pub min_completions: usize,

    /// Mean score below which content is regenerated
    #[serde(default = "default_regeneration_threshold")]
    pub regeneration_threshold: f64,

    /// Lifetime of news updates, in days
    #[serde(default = "default_news_expiry_days")]
    pub news_expiry_days: i64,

    /// Lifetime of research updates, in days
    #[serde(default = "default_research_expiry_days")]
    pub research_expiry_days: i64,

    /// Period of the in-process refresh-all schedule; 0 disables it
    #[serde(default)]
    pub refresh_interval_secs: u64,
}

impl PipelineConfig {
    pub fn refresh_item_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_item_delay_ms)
    }

    /// None when the in-process schedule is disabled
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy {
            news_days: self.news_expiry_days,
            research_days: self.research_expiry_days,
        }
    }

    /// Validate pipeline configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=Amazingness::MAX).contains(&self.regeneration_threshold) {
            return Err(ValidationError::InvalidThreshold);
        }
        if self.min_completions == 0 {
            return Err(ValidationError::InvalidAttempts("pipeline.min_completions"));
        }
        if self.refresh_window_days <= 0
            || self.news_expiry_days <= 0
            || self.research_expiry_days <= 0
        {
            return Err(ValidationError::InvalidWindow);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            refresh_window_days: default_refresh_window_days(),
            refresh_item_delay_ms: default_refresh_item_delay(),
            min_completions: default_min_completions(),
            regeneration_threshold: default_regeneration_threshold(),
            news_expiry_days: default_news_expiry_days(),
            research_expiry_days: default_research_expiry_days(),
            refresh_interval_secs: 0,
        }
    }
}

fn default_refresh_window_days() -> i64 {
    7
}

fn default_refresh_item_delay() -> u64 {
    1000
}

fn default_min_completions() -> usize {
    5
}

fn default_regeneration_threshold() -> f64 {
    Amazingness::GOOD_THRESHOLD
}

fn default_news_expiry_days() -> i64 {
    30
}

fn default_research_expiry_days() -> i64 {
    90
}
