//! Improvement suggestions for underperforming content.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Aspect of a content item a suggestion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementArea {
    Clarity,
    Engagement,
    Difficulty,
    Content,
    Structure,
}

impl ImprovementArea {
    /// Returns the wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clarity => "clarity",
            Self::Engagement => "engagement",
            Self::Difficulty => "difficulty",
            Self::Content => "content",
            Self::Structure => "structure",
        }
    }
}

impl fmt::Display for ImprovementArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a suggestion. Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    Low,
    Medium,
    High,
}

impl SuggestionPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A prioritized recommendation for rewriting a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub area: ImprovementArea,
    pub priority: SuggestionPriority,
    pub suggestion: String,
    /// Confidence in the suggestion (0-1).
    pub confidence: f64,
}

impl ImprovementSuggestion {
    pub fn new(
        area: ImprovementArea,
        priority: SuggestionPriority,
        suggestion: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            area,
            priority,
            suggestion: suggestion.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Sorts suggestions by descending priority, then descending confidence.
///
/// The sort is stable, so equal suggestions keep their rule order.
pub fn rank_suggestions(suggestions: &mut [ImprovementSuggestion]) {
    suggestions.sort_by(|a, b| {
        b.priority.cmp(&a.priority).then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
    });
}

/// Checks the ordering invariant of a suggestion list.
pub fn is_ranked(suggestions: &[ImprovementSuggestion]) -> bool {
    suggestions.windows(2).all(|pair| {
        pair[0].priority > pair[1].priority
            || (pair[0].priority == pair[1].priority && pair[0].confidence >= pair[1].confidence)
    })
}
