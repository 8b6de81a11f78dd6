//! Analysis module - Pure domain services for content performance.
//!
//! - `performance` - Completion summaries and rule-based suggestions
//! - `feedback_keywords` - Phrase rules over free-text feedback
//! - `suggestion` - Suggestion types and ranking

mod feedback_keywords;
mod performance;
mod suggestion;

pub use feedback_keywords::{keyword_confidence, suggestions_from_feedback, FeedbackRule, FEEDBACK_RULES};
pub use performance::{PerformanceCalculator, PerformanceSummary, FEEDBACK_SAMPLE_SIZE, MIN_COMPLETIONS};
pub use suggestion::{
    is_ranked, rank_suggestions, ImprovementArea, ImprovementSuggestion, SuggestionPriority,
};

#[cfg(test)]
pub(crate) use performance::fixtures;
