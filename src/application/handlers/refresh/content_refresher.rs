//! ContentRefresher - Rewrites stored content from performance and research signals.
//!
//! A refresh either commits one complete revision or changes nothing. Expired
//! research updates are filtered out before the prompt is built and are never
//! merged.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::handlers::analysis::ResearchAdvisor;
use crate::application::PipelineError;
use crate::domain::analysis::{
    ImprovementArea, ImprovementSuggestion, PerformanceCalculator, FEEDBACK_SAMPLE_SIZE,
};
use crate::domain::content::{ContentItem, NewRevision, RefreshTrigger};
use crate::domain::foundation::{ContentId, Timestamp};
use crate::domain::prompt::PromptBuilder;
use crate::domain::research::{partition_applicable, ResearchUpdate};
use crate::ports::{CompletionRepository, ContentProvider, ContentRepository};

/// Result of a committed rewrite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshOutcome {
    pub content_id: ContentId,
    pub revision: u32,
    pub trigger: RefreshTrigger,
    /// Ranked suggestions the rewrite was asked to address.
    pub suggestions: Vec<ImprovementSuggestion>,
    pub feedback_count: usize,
    pub research_updates_applied: usize,
    pub skipped_expired: usize,
}

/// Command handler that rewrites one content item.
pub struct ContentRefresher {
    provider: Arc<dyn ContentProvider>,
    contents: Arc<dyn ContentRepository>,
    completions: Arc<dyn CompletionRepository>,
    research: Arc<ResearchAdvisor>,
}

impl ContentRefresher {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        contents: Arc<dyn ContentRepository>,
        completions: Arc<dyn CompletionRepository>,
        research: Arc<ResearchAdvisor>,
    ) -> Self {
        Self {
            provider,
            contents,
            completions,
            research,
        }
    }

    /// Rewrites from completion telemetry alone.
    #[instrument(skip(self))]
    pub async fn refresh(
        &self,
        content_id: ContentId,
        trigger: RefreshTrigger,
    ) -> Result<RefreshOutcome, PipelineError> {
        let item = self.load(content_id).await?;
        self.rewrite(item, Vec::new(), trigger).await
    }

    /// Rewrites with research updates from the advisor merged in.
    #[instrument(skip(self))]
    pub async fn refresh_with_research(
        &self,
        content_id: ContentId,
        trigger: RefreshTrigger,
    ) -> Result<RefreshOutcome, PipelineError> {
        let item = self.load(content_id).await?;
        let updates = self
            .research
            .suggest_updates(content_id, item.topic(), &item.current().content)
            .await;
        self.rewrite(item, updates, trigger).await
    }

    /// Rewrites with caller-supplied research updates.
    pub async fn refresh_with_updates(
        &self,
        content_id: ContentId,
        updates: Vec<ResearchUpdate>,
        trigger: RefreshTrigger,
    ) -> Result<RefreshOutcome, PipelineError> {
        let item = self.load(content_id).await?;
        self.rewrite(item, updates, trigger).await
    }

    async fn load(&self, content_id: ContentId) -> Result<ContentItem, PipelineError> {
        self.contents
            .find(content_id)
            .await?
            .ok_or_else(|| PipelineError::not_found("content", content_id))
    }

    async fn rewrite(
        &self,
        item: ContentItem,
        updates: Vec<ResearchUpdate>,
        trigger: RefreshTrigger,
    ) -> Result<RefreshOutcome, PipelineError> {
        let now = Timestamp::now();
        let content_id = item.id();
        let current = &item.current().content;

        // 1. Performance signals
        let records = self.completions.for_content(content_id).await?;
        let suggestions = PerformanceCalculator::suggest(&records);
        let feedback = PerformanceCalculator::feedback_sample(&records, FEEDBACK_SAMPLE_SIZE);

        // 2. Drop expired research
        let (fresh, expired) = partition_applicable(updates, now);
        for update in &expired {
            info!(
                content_id = %content_id,
                update_type = update.update_type.as_str(),
                expiry_date = %update.expiry_date,
                "Skipping expired research update"
            );
        }

        // 3. Regenerate; a failure leaves the stored item untouched
        let prompt = PromptBuilder::rewrite(
            current,
            item.topic(),
            item.audience(),
            &suggestions,
            &feedback,
            &fresh,
        );
        let mut content = self.provider.generate(&prompt).await.map_err(|err| {
            warn!(content_id = %content_id, error = %err, "Rewrite generation failed");
            PipelineError::UpstreamGeneration(err)
        })?;
        content.metadata.generated_at = now;
        if content.metadata.category.trim().is_empty() {
            content.metadata.category = current.metadata.category.clone();
        }

        // 4. Commit revision and log entry together
        let revision = self
            .contents
            .commit_revision(
                content_id,
                NewRevision {
                    content,
                    areas: areas_touched(&suggestions),
                    trigger,
                    feedback_count: feedback.len(),
                    research_updates_applied: fresh.len(),
                },
                now,
            )
            .await?;

        info!(
            content_id = %content_id,
            revision,
            trigger = ?trigger,
            suggestions = suggestions.len(),
            research_updates = fresh.len(),
            "Content refreshed"
        );

        Ok(RefreshOutcome {
            content_id,
            revision,
            trigger,
            feedback_count: feedback.len(),
            suggestions,
            research_updates_applied: fresh.len(),
            skipped_expired: expired.len(),
        })
    }
}

/// Distinct areas in suggestion order.
fn areas_touched(suggestions: &[ImprovementSuggestion]) -> Vec<ImprovementArea> {
    let mut areas = Vec::new();
    for suggestion in suggestions {
        if !areas.contains(&suggestion.area) {
            areas.push(suggestion.area);
        }
    }
    areas
}
