//! Intent classification for tutor chat messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the learner is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    RecommendNext,
    ShowProgress,
    ProvideHelp,
    CreatePlan,
    Motivate,
    ShowInsights,
    GeneralChat,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecommendNext => "recommend_next",
            Self::ShowProgress => "show_progress",
            Self::ProvideHelp => "provide_help",
            Self::CreatePlan => "create_plan",
            Self::Motivate => "motivate",
            Self::ShowInsights => "show_insights",
            Self::GeneralChat => "general_chat",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule matches when every group has at least one keyword in the message.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub groups: &'static [&'static [&'static str]],
}

impl IntentRule {
    fn matches(&self, message: &str) -> bool {
        self.groups
            .iter()
            .all(|group| group.iter().any(|keyword| message.contains(keyword)))
    }
}

/// Rules in priority order; the first match wins.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::RecommendNext,
        groups: &[&["what"], &["next", "study", "learn"]],
    },
    IntentRule {
        intent: Intent::ShowProgress,
        groups: &[&["how"], &["doing", "progress"]],
    },
    IntentRule {
        intent: Intent::ProvideHelp,
        groups: &[&["help", "stuck", "confused"]],
    },
    IntentRule {
        intent: Intent::CreatePlan,
        groups: &[&["plan", "schedule", "organize"]],
    },
    IntentRule {
        intent: Intent::Motivate,
        groups: &[&["motivation", "encourage", "tired"]],
    },
    IntentRule {
        intent: Intent::ShowInsights,
        groups: &[&["insight", "analysis", "pattern"]],
    },
];

/// Classifies a free-text message. Unmatched or empty text is `GeneralChat`.
pub fn classify_intent(message: &str) -> Intent {
    let lowered = message.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::GeneralChat)
}
