//! UserProfileStore port - learner profiles and their completion history.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::UserId;
use crate::domain::user::{LearnerStats, LessonOutcome, UserProfile};

use super::RepositoryError;

/// Store for learner profiles.
///
/// Profiles are never deleted; `save` replaces the stored snapshot with a
/// newer version of the same aggregate.
#[async_trait]
pub trait UserProfileStore: Send + Sync {
    /// Find a profile by user ID.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;

    /// Persist a profile.
    async fn save(&self, profile: &UserProfile) -> Result<(), RepositoryError>;

    /// Append a lesson outcome to the user's history.
    async fn record_outcome(
        &self,
        user_id: &UserId,
        outcome: LessonOutcome,
    ) -> Result<(), RepositoryError>;

    /// All lesson outcomes for the user, oldest first.
    async fn outcomes(&self, user_id: &UserId) -> Result<Vec<LessonOutcome>, RepositoryError>;

    /// Returns the stored profile or a fresh one (not yet persisted).
    async fn find_or_new(&self, user_id: &UserId) -> Result<UserProfile, RepositoryError> {
        Ok(self
            .find(user_id)
            .await?
            .unwrap_or_else(|| UserProfile::new(user_id.clone())))
    }

    /// Aggregate statistics derived from the user's history.
    async fn stats(&self, user_id: &UserId, today: NaiveDate) -> Result<LearnerStats, RepositoryError> {
        let outcomes = self.outcomes(user_id).await?;
        Ok(LearnerStats::from_outcomes(&outcomes, today))
    }
}
