//! RefreshAll - Scheduled sweep over recently active content.
//!
//! Items are processed one at a time with a pause between them to respect
//! upstream rate limits. One item failing never stops the sweep. The
//! summary goes to the notification sink; a delivery failure is logged and
//! swallowed.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::ContentRefresher;
use crate::application::handlers::analysis::PerformanceAnalyzer;
use crate::application::PipelineError;
use crate::domain::content::RefreshTrigger;
use crate::domain::foundation::{ContentId, Timestamp};
use crate::ports::{ContentRepository, NotificationSink};

const DEFAULT_WINDOW_DAYS: i64 = 7;
const DEFAULT_ITEM_DELAY: Duration = Duration::from_secs(1);

/// Counts from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    /// Items examined.
    pub analyzed: usize,
    /// Items rewritten.
    pub updated: usize,
    /// Items with too few completions to judge.
    pub skipped: usize,
    /// Items whose analysis or rewrite failed.
    pub failed: usize,
}

impl RefreshSummary {
    fn message(&self) -> String {
        format!(
            "Content refresh finished: {} analyzed, {} updated, {} skipped, {} failed",
            self.analyzed, self.updated, self.skipped, self.failed
        )
    }
}

enum ItemResult {
    Updated,
    Healthy,
    Skipped,
}

/// Batch handler for the refresh schedule.
pub struct RefreshAll {
    contents: Arc<dyn ContentRepository>,
    analyzer: Arc<PerformanceAnalyzer>,
    refresher: Arc<ContentRefresher>,
    notifier: Arc<dyn NotificationSink>,
    window_days: i64,
    item_delay: Duration,
}

impl RefreshAll {
    pub fn new(
        contents: Arc<dyn ContentRepository>,
        analyzer: Arc<PerformanceAnalyzer>,
        refresher: Arc<ContentRefresher>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            contents,
            analyzer,
            refresher,
            notifier,
            window_days: DEFAULT_WINDOW_DAYS,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    pub fn with_window_days(mut self, days: i64) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    /// Runs one sweep. Only failing to list candidates is an error.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RefreshSummary, PipelineError> {
        let since = Timestamp::now().minus_days(self.window_days);
        let candidates = self.contents.updated_since(since).await?;
        let mut summary = RefreshSummary::default();

        for (i, content_id) in candidates.iter().enumerate() {
            if i > 0 && !self.item_delay.is_zero() {
                tokio::time::sleep(self.item_delay).await;
            }

            summary.analyzed += 1;
            match self.process(*content_id).await {
                Ok(ItemResult::Updated) => summary.updated += 1,
                Ok(ItemResult::Healthy) => {}
                Ok(ItemResult::Skipped) => summary.skipped += 1,
                Err(err) => {
                    warn!(content_id = %content_id, error = %err, "Refresh of item failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            analyzed = summary.analyzed,
            updated = summary.updated,
            skipped = summary.skipped,
            failed = summary.failed,
            "Refresh sweep complete"
        );

        if let Err(err) = self.notifier.notify(&summary.message()).await {
            warn!(error = %err, "Refresh summary notification failed");
        }
        Ok(summary)
    }

    async fn process(&self, content_id: ContentId) -> Result<ItemResult, PipelineError> {
        let Some(report) = self.analyzer.analyze(content_id).await? else {
            return Ok(ItemResult::Skipped);
        };
        if !report.summary.needs_regeneration {
            return Ok(ItemResult::Healthy);
        }
        self.refresher
            .refresh_with_research(content_id, RefreshTrigger::Performance)
            .await?;
        Ok(ItemResult::Updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::research::SimulatedResearchSource;
    use crate::application::handlers::analysis::ResearchAdvisor;
    use crate::application::handlers::test_support::{
        mock_provider, FailingProvider, RecordingSink, Stores,
    };
    use crate::domain::analysis::fixtures::record;
    use crate::domain::research::ExpiryPolicy;
    use crate::ports::ContentProvider;

    fn sweep(
        stores: &Stores,
        provider: Arc<dyn ContentProvider>,
        sink: Arc<RecordingSink>,
    ) -> RefreshAll {
        let advisor = ResearchAdvisor::new(
            Arc::new(SimulatedResearchSource::new()),
            ExpiryPolicy::default(),
        );
        let refresher = ContentRefresher::new(
            provider,
            stores.contents.clone(),
            stores.completions.clone(),
            Arc::new(advisor),
        );
        let analyzer = PerformanceAnalyzer::new(stores.contents.clone(), stores.completions.clone());
        RefreshAll::new(
            stores.contents.clone(),
            Arc::new(analyzer),
            Arc::new(refresher),
            sink,
        )
        .with_item_delay(Duration::ZERO)
    }

    async fn seeded(stores: &Stores, updated_at: Timestamp, scores: &[f64]) -> ContentId {
        let id = stores.seed_content("Ownership", updated_at).await;
        stores
            .seed_completions(scores.iter().map(|s| record(id, *s)).collect())
            .await;
        id
    }

    #[tokio::test]
    async fn sweep_refreshes_only_underperformers() {
        let stores = Stores::new();
        let now = Timestamp::now();
        let weak = seeded(&stores, now, &[40.0; 5]).await;
        let strong = seeded(&stores, now, &[90.0; 5]).await;
        let _sparse = seeded(&stores, now, &[40.0; 2]).await;
        let _old = seeded(&stores, now.minus_days(30), &[40.0; 5]).await;
        let sink = Arc::new(RecordingSink::default());

        let summary = sweep(&stores, mock_provider(), sink.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(
            summary,
            RefreshSummary {
                analyzed: 3,
                updated: 1,
                skipped: 1,
                failed: 0
            }
        );
        let weak_item = stores.contents.find(weak).await.unwrap().unwrap();
        assert_eq!(weak_item.revision_number(), 2);
        assert_eq!(
            weak_item.improvement_log()[0].trigger,
            RefreshTrigger::Performance
        );
        let strong_item = stores.contents.find(strong).await.unwrap().unwrap();
        assert_eq!(strong_item.revision_number(), 1);
        assert_eq!(sink.messages().len(), 1);
        assert!(sink.messages()[0].contains("1 updated"));
    }

    #[tokio::test]
    async fn item_failures_are_isolated() {
        let stores = Stores::new();
        let now = Timestamp::now();
        seeded(&stores, now, &[40.0; 5]).await;
        seeded(&stores, now, &[30.0; 5]).await;

        let summary = sweep(&stores, Arc::new(FailingProvider), Arc::new(RecordingSink::default()))
            .run()
            .await
            .unwrap();

        assert_eq!(summary.analyzed, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.updated, 0);
    }

    #[tokio::test]
    async fn notification_failure_is_swallowed() {
        let stores = Stores::new();
        let sink = Arc::new(RecordingSink::failing());

        let summary = sweep(&stores, mock_provider(), sink.clone()).run().await.unwrap();

        assert_eq!(summary, RefreshSummary::default());
        assert_eq!(sink.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn items_are_spaced_by_the_configured_delay() {
        let stores = Stores::new();
        let now = Timestamp::now();
        for _ in 0..3 {
            seeded(&stores, now, &[90.0; 5]).await;
        }
        let started = tokio::time::Instant::now();

        sweep(&stores, mock_provider(), Arc::new(RecordingSink::default()))
            .with_item_delay(Duration::from_millis(1000))
            .run()
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(2000));
        assert!(elapsed < Duration::from_millis(3000));
    }
}
