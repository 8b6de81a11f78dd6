//! Content Provider Port - Structured content from prompts.
//!
//! Two implementations exist: a live provider backed by a `TextCompletion`
//! service and a deterministic mock. Which one runs is decided once at
//! startup and injected.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::content::GeneratedContent;
use crate::domain::prompt::PromptSpec;
use crate::domain::user::{LessonOutcome, UserProfile};

use super::text_completion::AIError;

/// Largest difficulty adjustment a performance analysis may suggest.
pub const MAX_DIFFICULTY_ADJUSTMENT: i8 = 2;

/// Port for producing structured learning content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Generates structured content for a prompt.
    async fn generate(&self, prompt: &PromptSpec) -> Result<GeneratedContent, ProviderError>;

    /// Generates assessment questions for a topic.
    async fn generate_questions(
        &self,
        topic: &str,
        difficulty: u8,
        profile: Option<&UserProfile>,
    ) -> Result<Vec<Question>, ProviderError>;

    /// Analyzes a learner's completion history.
    async fn analyze_performance(
        &self,
        history: &[LessonOutcome],
    ) -> Result<PerformanceInsights, ProviderError>;

    /// Which implementation this is.
    fn mode(&self) -> ProviderMode;
}

/// Live or mock content generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    Live,
    Mock,
}

impl ProviderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub difficulty: u8,
}

/// Provider-side interpretation of a learner's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceInsights {
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub knowledge_gaps: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub next_learning_path: Vec<String>,
    /// Suggested change in difficulty, within -2..=2.
    #[serde(default)]
    pub difficulty_adjustment: i8,
}

impl PerformanceInsights {
    /// Clamps the difficulty adjustment into its valid range.
    pub fn normalized(mut self) -> Self {
        self.difficulty_adjustment = self
            .difficulty_adjustment
            .clamp(-MAX_DIFFICULTY_ADJUSTMENT, MAX_DIFFICULTY_ADJUSTMENT);
        self
    }
}

/// Content provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// The completion did not contain valid structured content.
    #[error("failed to parse provider output: {0}")]
    Parse(String),

    /// The underlying completion service failed.
    #[error(transparent)]
    Upstream(#[from] AIError),

    /// A single call exceeded its deadline.
    #[error("provider call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl ProviderError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Parse failures and timeouts are retried, as are transient upstream errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Parse(_) | ProviderError::Timeout { .. } => true,
            ProviderError::Upstream(err) => err.is_retryable(),
        }
    }
}
