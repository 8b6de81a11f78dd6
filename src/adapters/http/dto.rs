//! HTTP DTOs for the pipeline API.
//!
//! Most responses serialize application types directly; these cover the
//! request shapes and envelopes that exist only at the HTTP boundary.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ContentId;
use crate::domain::research::ResearchUpdate;
use crate::ports::{ProviderMode, Question};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One tutor chat turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    #[serde(default)]
    pub message: String,
}

/// Query parameters for a single-item refresh.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshQuery {
    /// Merge research updates into the rewrite.
    #[serde(default)]
    pub research: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Research updates suggested for a content item.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchUpdatesResponse {
    pub content_id: ContentId,
    pub updates: Vec<ResearchUpdate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: ProviderMode,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code for programmatic handling.
    pub error: String,
    /// Human-readable description.
    pub details: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}
