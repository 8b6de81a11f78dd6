//! Derived analytics attached to every orchestration response.

use serde::{Deserialize, Serialize};

const MAX_COMPLETION_RATE: f64 = 0.95;
const MAX_CONFIDENCE: f64 = 0.95;

/// Heuristic analytics for generated content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalytics {
    pub confidence_score: f64,
    pub predicted_completion_rate: f64,
    pub estimated_minutes: u32,
    /// Predicted engagement (1-10) when an estimate was produced.
    pub predicted_engagement: Option<f64>,
}

impl ContentAnalytics {
    /// Completion rate: 0.75, +0.10 when personalized, +0.05 for a beginner
    /// audience, capped at 0.95.
    pub fn predicted_completion_rate(personalized: bool, beginner_audience: bool) -> f64 {
        let mut rate: f64 = 0.75;
        if personalized {
            rate += 0.10;
        }
        if beginner_audience {
            rate += 0.05;
        }
        rate.min(MAX_COMPLETION_RATE)
    }

    /// Confidence: provider confidence, +0.05 when personalized, capped at 0.95.
    pub fn confidence_score(content_confidence: f64, personalized: bool) -> f64 {
        let bonus = if personalized { 0.05 } else { 0.0 };
        (content_confidence + bonus).clamp(0.0, MAX_CONFIDENCE)
    }

    pub fn compute(
        content_confidence: f64,
        personalized: bool,
        beginner_audience: bool,
        estimated_minutes: u32,
        predicted_engagement: Option<f64>,
    ) -> Self {
        Self {
            confidence_score: Self::confidence_score(content_confidence, personalized),
            predicted_completion_rate: Self::predicted_completion_rate(
                personalized,
                beginner_audience,
            ),
            estimated_minutes,
            predicted_engagement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_rate_adds_bonuses_and_caps() {
        assert_eq!(ContentAnalytics::predicted_completion_rate(false, false), 0.75);
        assert!((ContentAnalytics::predicted_completion_rate(false, true) - 0.80).abs() < 1e-9);
        assert!((ContentAnalytics::predicted_completion_rate(true, false) - 0.85).abs() < 1e-9);
        assert!(ContentAnalytics::predicted_completion_rate(true, true) <= 0.95);
    }

    #[test]
    fn unpersonalized_confidence_is_provider_confidence() {
        assert_eq!(ContentAnalytics::confidence_score(0.85, false), 0.85);
        assert!((ContentAnalytics::confidence_score(0.85, true) - 0.9).abs() < 1e-9);
        assert_eq!(ContentAnalytics::confidence_score(0.95, true), 0.95);
    }
}
