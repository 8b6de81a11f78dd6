//! PerformanceAnalyzer - Judges a content item from its completion telemetry.
//!
//! Analysis never writes. Fewer than `min_completions` records is not an
//! error: the analyzer declines to judge and returns `None`.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::PipelineError;
use crate::domain::analysis::{PerformanceCalculator, PerformanceSummary, MIN_COMPLETIONS};
use crate::domain::foundation::{Amazingness, ContentId};
use crate::ports::{CompletionRepository, ContentRepository};

/// Verdict on one content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub content_id: ContentId,
    /// Analysis alone never rewrites content.
    pub updated: bool,
    /// Mean score (0-150).
    pub score: f64,
    #[serde(flatten)]
    pub summary: PerformanceSummary,
}

/// Query handler over completion records.
pub struct PerformanceAnalyzer {
    contents: Arc<dyn ContentRepository>,
    completions: Arc<dyn CompletionRepository>,
    min_completions: usize,
    threshold: f64,
}

impl PerformanceAnalyzer {
    pub fn new(
        contents: Arc<dyn ContentRepository>,
        completions: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            contents,
            completions,
            min_completions: MIN_COMPLETIONS,
            threshold: Amazingness::GOOD_THRESHOLD,
        }
    }

    /// Overrides the sample size floor and the regeneration threshold.
    pub fn with_thresholds(mut self, min_completions: usize, threshold: f64) -> Self {
        self.min_completions = min_completions;
        self.threshold = threshold;
        self
    }

    #[instrument(skip(self))]
    pub async fn analyze(
        &self,
        content_id: ContentId,
    ) -> Result<Option<PerformanceReport>, PipelineError> {
        if self.contents.find(content_id).await?.is_none() {
            return Err(PipelineError::not_found("content", content_id));
        }

        let records = self.completions.for_content(content_id).await?;
        let Some(summary) =
            PerformanceCalculator::summarize(&records, self.min_completions, self.threshold)
        else {
            debug!(
                content_id = %content_id,
                sample_size = records.len(),
                "Not enough completions to judge"
            );
            return Ok(None);
        };

        debug!(
            content_id = %content_id,
            score = summary.mean_score,
            status = summary.status.as_str(),
            needs_regeneration = summary.needs_regeneration,
            "Content analyzed"
        );
        Ok(Some(PerformanceReport {
            content_id,
            updated: false,
            score: summary.mean_score,
            summary,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Stores;
    use crate::domain::analysis::fixtures::record;
    use crate::domain::foundation::{QualityBand, Timestamp};

    fn analyzer(stores: &Stores) -> PerformanceAnalyzer {
        PerformanceAnalyzer::new(stores.contents.clone(), stores.completions.clone())
    }

    async fn seeded(stores: &Stores, scores: &[f64]) -> ContentId {
        let id = stores.seed_content("Ownership", Timestamp::now()).await;
        stores
            .seed_completions(scores.iter().map(|s| record(id, *s)).collect())
            .await;
        id
    }

    #[tokio::test]
    async fn four_completions_are_not_judged() {
        let stores = Stores::new();
        let id = seeded(&stores, &[50.0; 4]).await;

        assert_eq!(analyzer(&stores).analyze(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn five_completions_at_85_are_flagged_but_not_updated() {
        let stores = Stores::new();
        let id = seeded(&stores, &[85.0; 5]).await;

        let report = analyzer(&stores).analyze(id).await.unwrap().unwrap();

        assert!(!report.updated);
        assert_eq!(report.score, 85.0);
        assert_eq!(report.summary.status, QualityBand::NeedsImprovement);
        assert!(report.summary.needs_regeneration);
    }

    #[tokio::test]
    async fn mean_of_ninety_five_is_good_and_kept() {
        let stores = Stores::new();
        let id = seeded(&stores, &[95.0; 5]).await;

        let report = analyzer(&stores).analyze(id).await.unwrap().unwrap();

        assert_eq!(report.summary.status, QualityBand::Good);
        assert!(!report.summary.needs_regeneration);
    }

    #[tokio::test]
    async fn custom_floor_applies() {
        let stores = Stores::new();
        let id = seeded(&stores, &[70.0; 3]).await;

        let report = analyzer(&stores)
            .with_thresholds(3, 90.0)
            .analyze(id)
            .await
            .unwrap();
        assert_eq!(report.unwrap().summary.sample_size, 3);
    }

    #[tokio::test]
    async fn unknown_content_is_not_found() {
        let stores = Stores::new();
        let err = analyzer(&stores).analyze(ContentId::new()).await.unwrap_err();
        assert!(matches!(err, PipelineError::NotFound { .. }));
    }
}
