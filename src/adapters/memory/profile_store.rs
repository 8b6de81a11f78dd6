//! In-memory learner profiles and lesson history.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::user::{LessonOutcome, UserProfile};
use crate::ports::{RepositoryError, UserProfileStore};

/// Profiles and outcomes keyed by user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
    outcomes: Arc<RwLock<HashMap<UserId, Vec<LessonOutcome>>>>,
}

impl InMemoryUserProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl UserProfileStore for InMemoryUserProfileStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn record_outcome(
        &self,
        user_id: &UserId,
        outcome: LessonOutcome,
    ) -> Result<(), RepositoryError> {
        self.outcomes
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .push(outcome);
        Ok(())
    }

    async fn outcomes(&self, user_id: &UserId) -> Result<Vec<LessonOutcome>, RepositoryError> {
        Ok(self
            .outcomes
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
