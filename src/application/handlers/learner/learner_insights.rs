//! LearnerInsights - Provider interpretation of a learner's history.

use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use crate::application::PipelineError;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::LearnerStats;
use crate::ports::{ContentProvider, PerformanceInsights, ProviderMode, UserProfileStore};

/// Aggregate stats alongside the provider's reading of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnerInsightsView {
    pub user_id: UserId,
    pub stats: LearnerStats,
    pub insights: PerformanceInsights,
    pub provider: ProviderMode,
}

/// Query handler for learner insights.
pub struct LearnerInsights {
    provider: Arc<dyn ContentProvider>,
    profiles: Arc<dyn UserProfileStore>,
}

impl LearnerInsights {
    pub fn new(provider: Arc<dyn ContentProvider>, profiles: Arc<dyn UserProfileStore>) -> Self {
        Self { provider, profiles }
    }

    #[instrument(skip(self))]
    pub async fn handle(&self, user_id: &str) -> Result<LearnerInsightsView, PipelineError> {
        let user_id = UserId::new(user_id)?;
        let outcomes = self.profiles.outcomes(&user_id).await?;
        let stats = LearnerStats::from_outcomes(&outcomes, Timestamp::now().date());

        let insights = self
            .provider
            .analyze_performance(&outcomes)
            .await
            .map_err(PipelineError::UpstreamGeneration)?
            .normalized();

        Ok(LearnerInsightsView {
            user_id,
            stats,
            insights,
            provider: self.provider.mode(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{mock_provider, Stores};

    #[tokio::test]
    async fn new_learner_gets_starter_insights() {
        let stores = Stores::new();
        let view = LearnerInsights::new(mock_provider(), stores.profiles.clone())
            .handle("fresh")
            .await
            .unwrap();

        assert!(view.stats.is_new_learner());
        assert_eq!(view.insights.difficulty_adjustment, 0);
        assert_eq!(view.provider, ProviderMode::Mock);
    }

    #[tokio::test]
    async fn weak_history_lowers_difficulty() {
        let stores = Stores::new();
        stores.seed_outcomes("strugg", &[("sql", 30.0), ("sql", 35.0)]).await;

        let view = LearnerInsights::new(mock_provider(), stores.profiles.clone())
            .handle("strugg")
            .await
            .unwrap();

        assert_eq!(view.stats.lesson_count, 2);
        assert_eq!(view.insights.difficulty_adjustment, -2);
        assert_eq!(view.insights.knowledge_gaps, vec!["sql".to_string()]);
    }
}
