//! SubmitCompletion - Records a learner finishing a content item.
//!
//! The completion record is the source of truth and its write is fatal.
//! Folding the outcome into the learner profile is best-effort. No analysis
//! runs here; refresh picks the record up on its next pass.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::PipelineError;
use crate::domain::content::{CompletionRecord, CompletionSubmission};
use crate::domain::foundation::{CompletionId, ContentId, QualityBand, Timestamp, UserId};
use crate::domain::user::{LearnerStats, LessonOutcome, PerformanceMetrics};
use crate::ports::{CompletionRepository, ContentRepository, UserProfileStore};

/// Days counted towards learning velocity.
const VELOCITY_WINDOW_DAYS: i64 = 7;

/// Acknowledgement returned to the submitting client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionReceipt {
    pub completion_id: CompletionId,
    pub content_id: ContentId,
    pub amazingness: f64,
    pub band: QualityBand,
}

/// Handler for lesson completion submissions.
pub struct SubmitCompletion {
    contents: Arc<dyn ContentRepository>,
    completions: Arc<dyn CompletionRepository>,
    profiles: Arc<dyn UserProfileStore>,
}

impl SubmitCompletion {
    pub fn new(
        contents: Arc<dyn ContentRepository>,
        completions: Arc<dyn CompletionRepository>,
        profiles: Arc<dyn UserProfileStore>,
    ) -> Self {
        Self {
            contents,
            completions,
            profiles,
        }
    }

    #[instrument(skip(self, submission), fields(content_id = %submission.content_id))]
    pub async fn handle(
        &self,
        submission: CompletionSubmission,
    ) -> Result<CompletionReceipt, PipelineError> {
        let now = Timestamp::now();

        // 1. Validate
        let record = CompletionRecord::from_submission(submission, now)?;

        // 2. Content must exist
        let item = self
            .contents
            .find(record.content_id)
            .await?
            .ok_or_else(|| PipelineError::not_found("content", record.content_id))?;

        // 3. Append the immutable record
        let amazingness = record.score.amazingness();
        let receipt = CompletionReceipt {
            completion_id: record.id,
            content_id: record.content_id,
            amazingness: amazingness.value(),
            band: amazingness.band(),
        };
        let outcome = LessonOutcome {
            content_id: record.content_id,
            topic: item.topic().to_string(),
            score: record.score,
            completed_at: now,
        };
        let user_id = record.user_id.clone();
        self.completions.append(record).await?;

        // 4. Fold into the learner profile
        if let Err(err) = self.update_profile(&user_id, outcome, now).await {
            warn!(user_id = %user_id, error = %err, "Profile update after completion failed");
        }

        info!(
            user_id = %user_id,
            amazingness = receipt.amazingness,
            band = receipt.band.as_str(),
            "Completion recorded"
        );
        Ok(receipt)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        outcome: LessonOutcome,
        now: Timestamp,
    ) -> Result<(), PipelineError> {
        self.profiles.record_outcome(user_id, outcome).await?;

        let outcomes = self.profiles.outcomes(user_id).await?;
        let stats = LearnerStats::from_outcomes(&outcomes, now.date());
        let mut profile = self.profiles.find_or_new(user_id).await?;

        let weak: Vec<String> = stats
            .improvement_areas()
            .iter()
            .map(|t| t.topic.clone())
            .collect();
        let strong: Vec<String> = stats.strong_topics().iter().map(|t| t.topic.clone()).collect();
        profile.record_signals(&weak, &strong);

        let window_start = now.minus_days(VELOCITY_WINDOW_DAYS);
        let recent = outcomes
            .iter()
            .filter(|o| !o.completed_at.is_before(&window_start))
            .count();
        let current = profile.performance_metrics().clone();
        profile.update_metrics(PerformanceMetrics::new(
            stats.mean_amazingness,
            current.completion_rate,
            current.preferred_difficulty,
            recent as f64,
        )?);

        self.profiles.save(&profile).await?;
        Ok(())
    }
}
