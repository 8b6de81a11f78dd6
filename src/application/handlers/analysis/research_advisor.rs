//! ResearchAdvisor - Turns current developments into time-boxed updates.
//!
//! A research feed outage yields no updates rather than an error, so a
//! refresh can still proceed on performance signals alone.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::content::GeneratedContent;
use crate::domain::foundation::{ContentId, Timestamp};
use crate::domain::research::{
    classify_priority, classify_update_type, Development, ExpiryPolicy, ResearchUpdate,
    SectionUpdate, UpdateType,
};
use crate::ports::ResearchSource;

/// Suggests research updates for stored content.
pub struct ResearchAdvisor {
    source: Arc<dyn ResearchSource>,
    expiry: ExpiryPolicy,
}

impl ResearchAdvisor {
    pub fn new(source: Arc<dyn ResearchSource>, expiry: ExpiryPolicy) -> Self {
        Self { source, expiry }
    }

    /// Updates for `content`, most urgent first.
    #[instrument(skip(self, content))]
    pub async fn suggest_updates(
        &self,
        content_id: ContentId,
        topic: &str,
        content: &GeneratedContent,
    ) -> Vec<ResearchUpdate> {
        let developments = match self.source.current_developments(topic).await {
            Ok(developments) => developments,
            Err(err) => {
                warn!(content_id = %content_id, error = %err, "Research source failed");
                return Vec::new();
            }
        };

        let now = Timestamp::now();
        let candidates = developments.len();
        let mut updates: Vec<ResearchUpdate> = developments
            .iter()
            .filter(|d| d.is_relevant())
            .map(|d| self.to_update(content_id, d, content, now))
            .collect();
        updates.sort_by(|a, b| b.priority.cmp(&a.priority));

        debug!(
            content_id = %content_id,
            candidates,
            relevant = updates.len(),
            "Research updates suggested"
        );
        updates
    }

    fn to_update(
        &self,
        content_id: ContentId,
        development: &Development,
        content: &GeneratedContent,
        now: Timestamp,
    ) -> ResearchUpdate {
        let update_type = classify_update_type(&development.suggested_integration);
        ResearchUpdate {
            content_id,
            update_type,
            priority: classify_priority(development.relevance),
            content_updates: vec![SectionUpdate {
                section: target_section(update_type, content),
                new_content: format!(
                    "{} {}",
                    development.summary, development.suggested_integration
                ),
                source_urls: vec![development.source.clone()],
                confidence: development.relevance,
            }],
            research_summary: development.headline.clone(),
            expiry_date: self.expiry.expiry_for(update_type, now),
        }
    }
}

/// Heading of the section an update of `update_type` lands in.
fn target_section(update_type: UpdateType, content: &GeneratedContent) -> String {
    let first = content.sections.first();
    let last = content.sections.last();
    let section = match update_type {
        UpdateType::FactUpdate | UpdateType::NewsIntegration => first,
        UpdateType::ExampleRefresh => content
            .sections
            .iter()
            .find(|s| s.code_example.is_some())
            .or(last),
        UpdateType::ContextModernization => last,
    };
    section
        .map(|s| s.heading.clone())
        .unwrap_or_else(|| content.title.clone())
}
