//! In-memory content items with append-only revisions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::{ContentItem, NewRevision};
use crate::domain::foundation::{ContentId, Timestamp};
use crate::ports::{ContentRepository, RepositoryError};

const ENTITY: &str = "content";

/// Content items keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    items: Arc<RwLock<HashMap<ContentId, ContentItem>>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn insert(&self, item: ContentItem) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id()) {
            return Err(RepositoryError::already_exists(ENTITY, item.id()));
        }
        items.insert(item.id(), item);
        Ok(())
    }

    async fn find(&self, id: ContentId) -> Result<Option<ContentItem>, RepositoryError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn commit_revision(
        &self,
        id: ContentId,
        revision: NewRevision,
        now: Timestamp,
    ) -> Result<u32, RepositoryError> {
        // Revision and log entry land under one write lock.
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;
        Ok(item.commit(revision, now))
    }

    async fn updated_since(&self, since: Timestamp) -> Result<Vec<ContentId>, RepositoryError> {
        let items = self.items.read().await;
        let mut recent: Vec<(Timestamp, ContentId)> = items
            .values()
            .filter(|item| item.updated_since(since))
            .map(|item| (item.updated_at(), item.id()))
            .collect();
        recent.sort();
        Ok(recent.into_iter().map(|(_, id)| id).collect())
    }
}
