//! Research updates and their classification rules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContentId, Timestamp};

/// Developments at or below this relevance are ignored.
pub const RELEVANCE_THRESHOLD: f64 = 0.7;

/// A candidate "current development" from a research source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Development {
    pub headline: String,
    pub summary: String,
    pub source: String,
    /// Relevance to the topic (0-1).
    pub relevance: f64,
    pub published_date: Timestamp,
    /// Suggested way of weaving the development into content.
    pub suggested_integration: String,
}

impl Development {
    /// True when relevance exceeds the threshold.
    pub fn is_relevant(&self) -> bool {
        self.relevance > RELEVANCE_THRESHOLD
    }
}

/// Kind of change a research update makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    NewsIntegration,
    FactUpdate,
    ExampleRefresh,
    ContextModernization,
}

impl UpdateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewsIntegration => "news_integration",
            Self::FactUpdate => "fact_update",
            Self::ExampleRefresh => "example_refresh",
            Self::ContextModernization => "context_modernization",
        }
    }
}

/// Urgency of a research update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Patch for one section of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionUpdate {
    pub section: String,
    pub new_content: String,
    pub source_urls: Vec<String>,
    pub confidence: f64,
}

/// A freshness patch, valid until `expiry_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchUpdate {
    pub content_id: ContentId,
    pub update_type: UpdateType,
    pub priority: ResearchPriority,
    pub content_updates: Vec<SectionUpdate>,
    pub research_summary: String,
    pub expiry_date: Timestamp,
}

impl ResearchUpdate {
    /// True while `now` has not passed the expiry date.
    pub fn is_applicable_at(&self, now: Timestamp) -> bool {
        !now.is_after(&self.expiry_date)
    }
}

/// Lifetime of research updates by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub news_days: i64,
    pub research_days: i64,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            news_days: 30,
            research_days: 90,
        }
    }
}

impl ExpiryPolicy {
    /// Expiry date for an update of `update_type` created at `now`.
    pub fn expiry_for(&self, update_type: UpdateType, now: Timestamp) -> Timestamp {
        match update_type {
            UpdateType::NewsIntegration => now.plus_days(self.news_days),
            _ => now.plus_days(self.research_days),
        }
    }
}

/// Classifies the update type from the suggested integration text.
///
/// Rules are checked in order: example, statistic/fact, news/current.
pub fn classify_update_type(integration: &str) -> UpdateType {
    const RULES: &[(&[&str], UpdateType)] = &[
        (&["example"], UpdateType::ExampleRefresh),
        (&["statistic", "fact"], UpdateType::FactUpdate),
        (&["news", "current"], UpdateType::NewsIntegration),
    ];
    let text = integration.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, update_type)| *update_type)
        .unwrap_or(UpdateType::ContextModernization)
}

/// Maps relevance onto a priority.
pub fn classify_priority(relevance: f64) -> ResearchPriority {
    if relevance > 0.9 {
        ResearchPriority::Critical
    } else if relevance > 0.8 {
        ResearchPriority::High
    } else if relevance > 0.6 {
        ResearchPriority::Medium
    } else {
        ResearchPriority::Low
    }
}

/// Splits updates into those still applicable at `now` and expired ones.
pub fn partition_applicable(
    updates: Vec<ResearchUpdate>,
    now: Timestamp,
) -> (Vec<ResearchUpdate>, Vec<ResearchUpdate>) {
    updates.into_iter().partition(|u| u.is_applicable_at(now))
}
