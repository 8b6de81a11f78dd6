//! Next-topic recommendations derived from a learner profile.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::user::UserProfile;

/// Most recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// A ranked next-topic recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecommendation {
    pub topic: String,
    pub reason: String,
    /// Ranking score (0-1).
    pub score: f64,
}

/// Ranks next topics from gaps, goal, interests and strengths, skipping the
/// current and recently studied topics.
pub fn recommend_topics(
    profile: &UserProfile,
    current_topic: &str,
    recent_topics: &[String],
    goal: Option<&str>,
) -> Vec<ContentRecommendation> {
    let mut seen: BTreeSet<String> = recent_topics
        .iter()
        .map(|t| t.trim().to_lowercase())
        .collect();
    seen.insert(current_topic.trim().to_lowercase());

    let mut candidates = Vec::new();
    let mut push = |topic: String, reason: String, score: f64| {
        if seen.insert(topic.to_lowercase()) {
            candidates.push(ContentRecommendation { topic, reason, score });
        }
    };

    for gap in profile.knowledge_gaps() {
        push(gap.clone(), format!("Closes a knowledge gap in {}", gap), 0.9);
    }
    if let Some(goal) = goal.map(str::trim).filter(|g| !g.is_empty()) {
        push(
            format!("{} for {}", current_topic.trim(), goal),
            format!("Moves you toward your goal: {}", goal),
            0.85,
        );
    }
    for interest in profile.interests() {
        push(
            format!("{} and {}", current_topic.trim(), interest),
            format!("Connects {} with your interest in {}", current_topic.trim(), interest),
            0.7,
        );
    }
    for strength in profile.strengths() {
        push(
            format!("Advanced {}", strength),
            format!("Builds on your strength in {}", strength),
            0.6,
        );
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.topic.cmp(&b.topic))
    });
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::user::ProfileOverrides;

    fn profile(gaps: &[&str], interests: &[&str], strengths: &[&str]) -> UserProfile {
        let mut p = UserProfile::new(UserId::new("u").unwrap());
        p.apply_overrides(&ProfileOverrides {
            knowledge_gaps: gaps.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            strengths: strengths.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
        .unwrap();
        p
    }

    #[test]
    fn gaps_rank_above_goal_interests_and_strengths() {
        let p = profile(&["linear algebra"], &["games"], &["python"]);
        let recs = recommend_topics(&p, "Neural Networks", &[], Some("get a job"));
        let scores: Vec<f64> = recs.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![0.9, 0.85, 0.7, 0.6]);
        assert_eq!(recs[0].topic, "linear algebra");
    }

    #[test]
    fn recent_and_current_topics_are_skipped() {
        let p = profile(&["calculus", "neural networks"], &[], &[]);
        let recs = recommend_topics(&p, "Neural Networks", &["Calculus".to_string()], None);
        assert!(recs.is_empty());
    }

    #[test]
    fn list_is_bounded() {
        let p = profile(&["a", "b", "c", "d", "e", "f"], &[], &[]);
        assert_eq!(recommend_topics(&p, "x", &[], None).len(), MAX_RECOMMENDATIONS);
    }
}
