//! Free-text feedback classification.
//!
//! An ordered rule table maps feedback phrases to an improvement area. Each
//! rule fires at most once per analysis; its confidence grows with the number
//! of feedback entries that matched it.

use super::suggestion::{ImprovementArea, ImprovementSuggestion, SuggestionPriority};

/// One phrase group and the suggestion it produces.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackRule {
    pub phrases: &'static [&'static str],
    pub area: ImprovementArea,
    pub priority: SuggestionPriority,
    pub suggestion: &'static str,
}

/// Rules in evaluation order.
pub const FEEDBACK_RULES: &[FeedbackRule] = &[
    FeedbackRule {
        phrases: &["confusing", "unclear", "hard to follow"],
        area: ImprovementArea::Clarity,
        priority: SuggestionPriority::High,
        suggestion: "Learners report confusion: simplify explanations and define terms before using them",
    },
    FeedbackRule {
        phrases: &["boring", "dull"],
        area: ImprovementArea::Engagement,
        priority: SuggestionPriority::High,
        suggestion: "Learners find the material dull: add scenarios, questions and interactive moments",
    },
    FeedbackRule {
        phrases: &["too long", "lengthy", "dragged on"],
        area: ImprovementArea::Structure,
        priority: SuggestionPriority::Medium,
        suggestion: "Content feels too long: split into shorter sections with summaries",
    },
    FeedbackRule {
        phrases: &["needs examples", "need examples", "more examples", "no examples"],
        area: ImprovementArea::Content,
        priority: SuggestionPriority::Medium,
        suggestion: "Add concrete worked examples for each key concept",
    },
    FeedbackRule {
        phrases: &["outdated", "out of date", "old information"],
        area: ImprovementArea::Content,
        priority: SuggestionPriority::High,
        suggestion: "Material is reported as outdated: refresh facts, tools and references",
    },
];

/// Confidence for a rule matched by `matches` feedback entries.
pub fn keyword_confidence(matches: usize) -> f64 {
    (0.5 + 0.2 * matches as f64).min(0.9)
}

/// Applies every rule to the feedback texts, returning one suggestion per rule
/// that matched at least one entry.
pub fn suggestions_from_feedback<'a, I>(feedback: I) -> Vec<ImprovementSuggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let lowered: Vec<String> = feedback.into_iter().map(str::to_lowercase).collect();

    FEEDBACK_RULES
        .iter()
        .filter_map(|rule| {
            let matches = lowered
                .iter()
                .filter(|text| rule.phrases.iter().any(|p| text.contains(p)))
                .count();
            (matches > 0).then(|| {
                ImprovementSuggestion::new(
                    rule.area,
                    rule.priority,
                    rule.suggestion,
                    keyword_confidence(matches),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_grows_with_matches_and_caps() {
        assert!((keyword_confidence(1) - 0.7).abs() < 1e-9);
        assert!((keyword_confidence(2) - 0.9).abs() < 1e-9);
        assert_eq!(keyword_confidence(7), 0.9);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let suggestions = suggestions_from_feedback(["Really CONFUSING intro"]);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].area, ImprovementArea::Clarity);
        assert_eq!(suggestions[0].priority, SuggestionPriority::High);
    }

    #[test]
    fn one_suggestion_per_rule_counting_all_entries() {
        let suggestions = suggestions_from_feedback(["boring", "so dull", "unclear"]);
        let engagement = suggestions
            .iter()
            .find(|s| s.area == ImprovementArea::Engagement)
            .unwrap();
        assert!((engagement.confidence - 0.9).abs() < 1e-9);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn outdated_and_examples_map_to_content() {
        let suggestions = suggestions_from_feedback(["outdated info", "needs examples"]);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.area == ImprovementArea::Content));
    }

    #[test]
    fn unrelated_feedback_yields_nothing() {
        assert!(suggestions_from_feedback(["loved it"]).is_empty());
    }
}
