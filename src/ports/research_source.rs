//! ResearchSource port - feed of current developments for a topic.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::research::Development;

/// Source of candidate developments (news feed, research index, ...).
#[async_trait]
pub trait ResearchSource: Send + Sync {
    /// Candidate developments related to `topic`. Relevance filtering is the
    /// caller's job.
    async fn current_developments(&self, topic: &str) -> Result<Vec<Development>, ResearchError>;
}

/// Research source failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResearchError {
    #[error("research source unavailable: {0}")]
    Unavailable(String),
}
