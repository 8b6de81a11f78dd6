//! CompletionRepository port - append-only completion telemetry.

use async_trait::async_trait;

use crate::domain::content::CompletionRecord;
use crate::domain::foundation::{ContentId, UserId};

use super::RepositoryError;

/// Append-only store of completion records.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Append a record. Records are immutable once written.
    async fn append(&self, record: CompletionRecord) -> Result<(), RepositoryError>;

    /// All records for a content item, in insertion order.
    async fn for_content(&self, content_id: ContentId) -> Result<Vec<CompletionRecord>, RepositoryError>;

    /// Most recent records for a user, newest first, at most `limit`.
    async fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<CompletionRecord>, RepositoryError>;
}
