//! Completion records - one per learner finishing a content item.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CompletionId, ContentId, SatisfactionRating, Score, TenPointRating, Timestamp, UserId,
    ValidationError,
};

/// Structured quality ratings a learner may attach to a completion (1-5 each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub clarity: u8,
    pub usefulness: u8,
}

impl QualityMetrics {
    /// Creates quality metrics, validating both ratings.
    pub fn new(clarity: u8, usefulness: u8) -> Result<Self, ValidationError> {
        for (field, value) in [("clarity", clarity), ("usefulness", usefulness)] {
            if !(1..=5).contains(&value) {
                return Err(ValidationError::out_of_range(field, 1.0, 5.0, f64::from(value)));
            }
        }
        Ok(Self {
            clarity,
            usefulness,
        })
    }

    /// True when either rating is below 3.
    pub fn is_poor(&self) -> bool {
        self.clarity < 3 || self.usefulness < 3
    }
}

/// Lesson completion as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSubmission {
    pub user_id: String,
    pub content_id: ContentId,
    pub score: f64,
    #[serde(default)]
    pub time_spent: u32,
    pub satisfaction_rating: u8,
    pub difficulty_rating: u8,
    pub engagement_score: u8,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub lesson_quality_metrics: Option<QualityMetrics>,
}

/// An immutable completion event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: CompletionId,
    pub user_id: UserId,
    pub content_id: ContentId,
    pub score: Score,
    /// Seconds spent on the content.
    pub time_spent: u32,
    pub satisfaction_rating: SatisfactionRating,
    pub difficulty_rating: TenPointRating,
    pub engagement_score: TenPointRating,
    pub feedback_text: Option<String>,
    pub quality_metrics: Option<QualityMetrics>,
    pub completed_at: Timestamp,
}

impl CompletionRecord {
    /// Validates a submission and stamps it with `completed_at`.
    pub fn from_submission(
        submission: CompletionSubmission,
        completed_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let quality_metrics = submission
            .lesson_quality_metrics
            .map(|m| QualityMetrics::new(m.clarity, m.usefulness))
            .transpose()?;

        Ok(Self {
            id: CompletionId::new(),
            user_id: UserId::new(submission.user_id)?,
            content_id: submission.content_id,
            score: Score::try_new(submission.score)?,
            time_spent: submission.time_spent,
            satisfaction_rating: SatisfactionRating::try_new(submission.satisfaction_rating)?,
            difficulty_rating: TenPointRating::try_new(
                "difficulty_rating",
                submission.difficulty_rating,
            )?,
            engagement_score: TenPointRating::try_new(
                "engagement_score",
                submission.engagement_score,
            )?,
            feedback_text: submission
                .feedback_text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            quality_metrics,
            completed_at,
        })
    }
}
