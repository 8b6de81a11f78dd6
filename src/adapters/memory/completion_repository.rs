//! In-memory, append-only completion telemetry.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::CompletionRecord;
use crate::domain::foundation::{ContentId, UserId};
use crate::ports::{CompletionRepository, RepositoryError};

/// Completion records in arrival order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompletionRepository {
    records: Arc<RwLock<Vec<CompletionRecord>>>,
}

impl InMemoryCompletionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompletionRepository for InMemoryCompletionRepository {
    async fn append(&self, record: CompletionRecord) -> Result<(), RepositoryError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn for_content(
        &self,
        content_id: ContentId,
    ) -> Result<Vec<CompletionRecord>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.content_id == content_id)
            .cloned()
            .collect())
    }

    async fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<CompletionRecord>, RepositoryError> {
        let records = self.records.read().await;
        let mut mine: Vec<CompletionRecord> = records
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        mine.truncate(limit);
        Ok(mine)
    }
}
