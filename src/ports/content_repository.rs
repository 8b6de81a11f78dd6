//! ContentRepository port - stored content items and their revisions.

use async_trait::async_trait;

use crate::domain::content::{ContentItem, NewRevision};
use crate::domain::foundation::{ContentId, Timestamp};

use super::RepositoryError;

/// Repository for content items.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Store a new item.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if an item with the same ID is stored.
    async fn insert(&self, item: ContentItem) -> Result<(), RepositoryError>;

    /// Find an item by ID.
    async fn find(&self, id: ContentId) -> Result<Option<ContentItem>, RepositoryError>;

    /// Atomically append a revision and its improvement log entry.
    ///
    /// Returns the new revision number. Either both are written or neither.
    async fn commit_revision(
        &self,
        id: ContentId,
        revision: NewRevision,
        now: Timestamp,
    ) -> Result<u32, RepositoryError>;

    /// IDs of items updated at or after `since`, oldest update first.
    async fn updated_since(&self, since: Timestamp) -> Result<Vec<ContentId>, RepositoryError>;
}
