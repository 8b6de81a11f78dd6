//! Engagement-optimization estimate for personalized content.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::content::GeneratedContent;
use crate::domain::user::{LearningStyle, UserProfile};

/// One ranked way to raise engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementOptimization {
    pub suggestion: String,
    /// Expected engagement gain on the 1-10 scale.
    pub expected_lift: f64,
}

/// Predicted engagement for one learner and content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEstimate {
    /// Predicted engagement score (1-10).
    pub predicted_score: f64,
    /// Whether the prediction used observed history or a profile-derived one.
    pub observed: bool,
    pub optimizations: Vec<EngagementOptimization>,
}

/// Builds an engagement history from profile metrics when none is observed.
pub fn synthetic_history(profile: &UserProfile) -> Vec<f64> {
    let metrics = profile.performance_metrics();
    vec![
        (metrics.completion_rate * 10.0).clamp(1.0, 10.0),
        (metrics.average_score / 15.0).clamp(1.0, 10.0),
        (metrics.learning_velocity * 2.0).clamp(1.0, 10.0),
    ]
}

/// Estimates engagement from observed engagement scores (1-10), falling back
/// to a synthetic history derived from the profile.
pub fn estimate_engagement(
    content: &GeneratedContent,
    profile: &UserProfile,
    observed_history: &[f64],
) -> EngagementEstimate {
    let observed = !observed_history.is_empty();
    let history = if observed {
        observed_history.to_vec()
    } else {
        synthetic_history(profile)
    };
    let baseline = history.iter().sum::<f64>() / history.len() as f64;

    let preferred = profile.performance_metrics().preferred_difficulty;
    let gap = (i16::from(content.difficulty_level) - i16::from(preferred)).unsigned_abs();
    let interactive = !content.interactive_elements.is_empty();

    let mut predicted = baseline;
    if interactive {
        predicted += 0.5;
    }
    predicted -= 0.5 * f64::from(gap.min(4));

    let mut optimizations = Vec::new();
    if !interactive {
        optimizations.push(EngagementOptimization {
            suggestion: "Add interactive checkpoints between sections".to_string(),
            expected_lift: 0.8,
        });
    }
    if gap > 1 {
        optimizations.push(EngagementOptimization {
            suggestion: format!(
                "Align difficulty ({}) with the learner's preferred level ({})",
                content.difficulty_level, preferred
            ),
            expected_lift: 0.6,
        });
    }
    if content.sections.len() > 6 {
        optimizations.push(EngagementOptimization {
            suggestion: "Split into shorter modules".to_string(),
            expected_lift: 0.4,
        });
    }
    let style_lift = match profile.learning_style() {
        LearningStyle::Visual => Some("Add diagrams or visual summaries"),
        LearningStyle::Auditory => Some("Offer an audio walkthrough"),
        LearningStyle::Kinesthetic if !content.has_code_examples() => {
            Some("Add a hands-on activity")
        }
        _ => None,
    };
    if let Some(suggestion) = style_lift {
        optimizations.push(EngagementOptimization {
            suggestion: suggestion.to_string(),
            expected_lift: 0.5,
        });
    }
    optimizations.sort_by(|a, b| {
        b.expected_lift
            .partial_cmp(&a.expected_lift)
            .unwrap_or(Ordering::Equal)
    });

    EngagementEstimate {
        predicted_score: predicted.clamp(1.0, 10.0),
        observed,
        optimizations,
    }
}
