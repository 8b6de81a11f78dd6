//! Errors surfaced by application handlers.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::{ProviderError, RepositoryError};

/// Failure of a pipeline operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The request was malformed; never retried.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Content generation failed after retries were exhausted.
    #[error("content generation failed: {0}")]
    UpstreamGeneration(ProviderError),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Persistence failed.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl PipelineError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<ProviderError> for PipelineError {
    fn from(err: ProviderError) -> Self {
        Self::UpstreamGeneration(err)
    }
}

impl From<RepositoryError> for PipelineError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AIError;

    #[test]
    fn repository_not_found_becomes_pipeline_not_found() {
        let err: PipelineError = RepositoryError::not_found("content", "abc").into();
        assert_eq!(err, PipelineError::not_found("content", "abc"));
    }

    #[test]
    fn upstream_error_keeps_last_message() {
        let err: PipelineError = ProviderError::from(AIError::unavailable("503")).into();
        assert_eq!(
            err.to_string(),
            "content generation failed: provider unavailable: 503"
        );
    }
}
