//! Learning history and the aggregate statistics derived from it.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Amazingness, ContentId, Score, Timestamp};

/// Maximum number of strong topics surfaced.
pub const MAX_STRONG_TOPICS: usize = 3;

/// Maximum number of improvement areas surfaced.
pub const MAX_IMPROVEMENT_AREAS: usize = 2;

/// A single completed lesson as seen from the learner's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonOutcome {
    pub content_id: ContentId,
    pub topic: String,
    pub score: Score,
    pub completed_at: Timestamp,
}

/// Mean performance on one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPerformance {
    pub topic: String,
    pub mean_amazingness: f64,
    pub lessons: usize,
}

/// Aggregate statistics over a learner's completion history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerStats {
    pub lesson_count: usize,
    /// Mean amazingness over all lessons; 0 when there are none.
    pub mean_amazingness: f64,
    /// Consecutive days with at least one completion, ending today or yesterday.
    pub streak_days: u32,
    /// Per-topic means, ordered by topic name.
    pub topics: Vec<TopicPerformance>,
}

impl LearnerStats {
    /// Derives statistics from raw outcomes.
    pub fn from_outcomes(outcomes: &[LessonOutcome], today: NaiveDate) -> Self {
        let lesson_count = outcomes.len();
        let mean_amazingness = if outcomes.is_empty() {
            0.0
        } else {
            outcomes
                .iter()
                .map(|o| o.score.value())
                .sum::<f64>()
                / lesson_count as f64
        };

        let mut by_topic: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for outcome in outcomes {
            let topic = outcome.topic.trim().to_lowercase();
            let entry = by_topic.entry(topic).or_insert((0.0, 0));
            entry.0 += outcome.score.value();
            entry.1 += 1;
        }
        let topics = by_topic
            .into_iter()
            .map(|(topic, (sum, lessons))| TopicPerformance {
                topic,
                mean_amazingness: sum / lessons as f64,
                lessons,
            })
            .collect();

        Self {
            lesson_count,
            mean_amazingness,
            streak_days: streak_days(outcomes, today),
            topics,
        }
    }

    /// True when there is no history at all.
    pub fn is_new_learner(&self) -> bool {
        self.lesson_count == 0
    }

    /// Topics with mean >= 110, best first, at most three.
    pub fn strong_topics(&self) -> Vec<&TopicPerformance> {
        let mut strong: Vec<&TopicPerformance> = self
            .topics
            .iter()
            .filter(|t| t.mean_amazingness >= Amazingness::AMAZING_THRESHOLD)
            .collect();
        strong.sort_by(|a, b| by_mean(b, a));
        strong.truncate(MAX_STRONG_TOPICS);
        strong
    }

    /// Topics with mean < 90, weakest first, at most two.
    pub fn improvement_areas(&self) -> Vec<&TopicPerformance> {
        let mut weak: Vec<&TopicPerformance> = self
            .topics
            .iter()
            .filter(|t| t.mean_amazingness < Amazingness::GOOD_THRESHOLD)
            .collect();
        weak.sort_by(|a, b| by_mean(a, b));
        weak.truncate(MAX_IMPROVEMENT_AREAS);
        weak
    }
}

fn by_mean(a: &TopicPerformance, b: &TopicPerformance) -> Ordering {
    a.mean_amazingness
        .partial_cmp(&b.mean_amazingness)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.topic.cmp(&b.topic))
}

fn streak_days(outcomes: &[LessonOutcome], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = outcomes.iter().map(|o| o.completed_at.date()).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(&latest) = days.first() else {
        return 0;
    };
    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    for pair in days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}


#[cfg(test)]
mod tests {
    use super::fixtures::outcome_at;
    use super::*;

    fn outcome(topic: &str, score: f64, days_ago: i64, today: Timestamp) -> LessonOutcome {
        outcome_at(topic, score, today.minus_days(days_ago))
    }

    #[test]
    fn empty_history_is_a_new_learner() {
        let stats = LearnerStats::from_outcomes(&[], Timestamp::now().date());
        assert!(stats.is_new_learner());
        assert_eq!(stats.mean_amazingness, 0.0);
        assert_eq!(stats.streak_days, 0);
        assert!(stats.strong_topics().is_empty());
    }

    #[test]
    fn strong_topics_are_top_three_by_mean_descending() {
        let now = Timestamp::now();
        let outcomes = vec![
            outcome("rust", 135.0, 0, now),
            outcome("go", 120.0, 0, now),
            outcome("python", 150.0, 0, now),
            outcome("haskell", 112.5, 0, now),
            outcome("sql", 100.0, 0, now),
        ];
        let stats = LearnerStats::from_outcomes(&outcomes, now.date());
        let strong: Vec<&str> = stats.strong_topics().iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(strong, vec!["python", "rust", "go"]);
    }

    #[test]
    fn improvement_areas_are_bottom_two_ascending() {
        let now = Timestamp::now();
        let outcomes = vec![
            outcome("css", 75.0, 0, now),
            outcome("regex", 30.0, 0, now),
            outcome("sql", 60.0, 0, now),
            outcome("git", 88.5, 0, now),
            outcome("rust", 135.0, 0, now),
        ];
        let stats = LearnerStats::from_outcomes(&outcomes, now.date());
        let weak: Vec<&str> = stats.improvement_areas().iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(weak, vec!["regex", "sql"]);
    }

    #[test]
    fn topics_are_grouped_case_insensitively() {
        let now = Timestamp::now();
        let outcomes = vec![outcome("Rust", 60.0, 0, now), outcome("rust ", 80.0, 1, now)];
        let stats = LearnerStats::from_outcomes(&outcomes, now.date());
        assert_eq!(stats.topics.len(), 1);
        assert_eq!(stats.topics[0].lessons, 2);
        assert_eq!(stats.topics[0].mean_amazingness, 70.0);
    }

    #[test]
    fn topic_means_use_raw_scores_against_thresholds() {
        let now = Timestamp::now();
        let outcomes = vec![
            outcome("rust", 85.0, 0, now),
            outcome("go", 105.0, 0, now),
            outcome("sql", 110.0, 0, now),
        ];
        let stats = LearnerStats::from_outcomes(&outcomes, now.date());
        let weak: Vec<&str> = stats.improvement_areas().iter().map(|t| t.topic.as_str()).collect();
        let strong: Vec<&str> = stats.strong_topics().iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(weak, vec!["rust"]);
        assert_eq!(strong, vec!["sql"]);
        assert_eq!(stats.mean_amazingness, 100.0);
    }

    #[test]
    fn streak_counts_consecutive_days_ending_today() {
        let now = Timestamp::now();
        let outcomes = vec![
            outcome("a", 50.0, 0, now),
            outcome("b", 50.0, 0, now),
            outcome("c", 50.0, 1, now),
            outcome("d", 50.0, 2, now),
            outcome("e", 50.0, 4, now),
        ];
        let stats = LearnerStats::from_outcomes(&outcomes, now.date());
        assert_eq!(stats.streak_days, 3);
    }

    #[test]
    fn streak_is_broken_after_a_missed_day() {
        let now = Timestamp::now();
        let outcomes = vec![outcome("a", 50.0, 2, now), outcome("b", 50.0, 3, now)];
        let stats = LearnerStats::from_outcomes(&outcomes, now.date());
        assert_eq!(stats.streak_days, 0);
    }
}
