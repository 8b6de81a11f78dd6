//! Performance analysis over completion records.
//!
//! Pure functions: callers fetch the records and decide what to do with the
//! summary and suggestions.

use serde::{Deserialize, Serialize};

use crate::domain::content::CompletionRecord;
use crate::domain::foundation::QualityBand;

use super::feedback_keywords::suggestions_from_feedback;
use super::suggestion::{
    rank_suggestions, ImprovementArea, ImprovementSuggestion, SuggestionPriority,
};

/// Fewest completions a judgement is made on.
pub const MIN_COMPLETIONS: usize = 5;

/// Most feedback entries forwarded to a rewrite prompt.
pub const FEEDBACK_SAMPLE_SIZE: usize = 5;

/// Aggregate view of a content item's completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub sample_size: usize,
    /// Mean score on the 0-150 scale.
    pub mean_score: f64,
    pub mean_satisfaction: f64,
    pub mean_engagement: f64,
    pub mean_difficulty: f64,
    pub status: QualityBand,
    pub needs_regeneration: bool,
}

/// Stateless analyzer for completion telemetry.
pub struct PerformanceCalculator;

impl PerformanceCalculator {
    /// Summarizes records, or `None` when fewer than `min_completions` exist.
    ///
    /// Regeneration is flagged when the mean score is below `threshold`.
    pub fn summarize(
        records: &[CompletionRecord],
        min_completions: usize,
        threshold: f64,
    ) -> Option<PerformanceSummary> {
        if records.is_empty() || records.len() < min_completions {
            return None;
        }

        let mean_score = mean(records, |r| r.score.value());

        Some(PerformanceSummary {
            sample_size: records.len(),
            mean_score,
            mean_satisfaction: mean(records, |r| f64::from(r.satisfaction_rating.value())),
            mean_engagement: mean(records, |r| f64::from(r.engagement_score.value())),
            mean_difficulty: mean(records, |r| f64::from(r.difficulty_rating.value())),
            status: QualityBand::classify(mean_score),
            needs_regeneration: mean_score < threshold,
        })
    }

    /// Produces ranked suggestions from every rule that applies.
    pub fn suggest(records: &[CompletionRecord]) -> Vec<ImprovementSuggestion> {
        if records.is_empty() {
            return Vec::new();
        }
        let mut suggestions = Vec::new();

        if share(records, |r| r.satisfaction_rating.value() < 3) > 0.3 {
            suggestions.push(ImprovementSuggestion::new(
                ImprovementArea::Content,
                SuggestionPriority::High,
                "Many learners are dissatisfied: revisit the core material and its relevance",
                0.9,
            ));
        }

        if share(records, |r| r.engagement_score.value() < 6) > 0.4 {
            suggestions.push(ImprovementSuggestion::new(
                ImprovementArea::Engagement,
                SuggestionPriority::High,
                "Engagement is low: add interactive elements, real-world scenarios and checkpoints",
                0.85,
            ));
        }

        let mean_difficulty = mean(records, |r| f64::from(r.difficulty_rating.value()));
        if mean_difficulty > 8.0 {
            suggestions.push(ImprovementSuggestion::new(
                ImprovementArea::Difficulty,
                SuggestionPriority::Medium,
                "Content is too hard: add prerequisites, scaffolding and gentler steps",
                0.8,
            ));
        } else if mean_difficulty < 3.0 {
            suggestions.push(ImprovementSuggestion::new(
                ImprovementArea::Difficulty,
                SuggestionPriority::Medium,
                "Content is too easy: add depth, advanced cases and stretch exercises",
                0.75,
            ));
        }

        if share(records, |r| r.quality_metrics.map(|m| m.is_poor()).unwrap_or(false)) > 0.3 {
            suggestions.push(ImprovementSuggestion::new(
                ImprovementArea::Clarity,
                SuggestionPriority::High,
                "Clarity and usefulness ratings are poor: restructure explanations around outcomes",
                0.9,
            ));
        }

        suggestions.extend(suggestions_from_feedback(
            records.iter().filter_map(|r| r.feedback_text.as_deref()),
        ));

        rank_suggestions(&mut suggestions);
        suggestions
    }

    /// Most recent feedback texts, newest first, at most `limit`.
    pub fn feedback_sample(records: &[CompletionRecord], limit: usize) -> Vec<String> {
        let mut with_feedback: Vec<&CompletionRecord> = records
            .iter()
            .filter(|r| r.feedback_text.is_some())
            .collect();
        with_feedback.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        with_feedback
            .into_iter()
            .filter_map(|r| r.feedback_text.clone())
            .take(limit)
            .collect()
    }
}

fn mean<F>(records: &[CompletionRecord], value: F) -> f64
where
    F: Fn(&CompletionRecord) -> f64,
{
    records.iter().map(value).sum::<f64>() / records.len() as f64
}

fn share<F>(records: &[CompletionRecord], predicate: F) -> f64
where
    F: Fn(&CompletionRecord) -> bool,
{
    records.iter().filter(|r| predicate(r)).count() as f64 / records.len() as f64
}
