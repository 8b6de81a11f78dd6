//! TutorAssistant - Answers a chat turn from the learner's own history.
//!
//! Template driven: the reply depends only on the classified intent and the
//! learner's aggregate stats, so the same history always yields the same reply.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::PipelineError;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::tutor::{build_reply, classify_intent, TutorContext, TutorReply};
use crate::ports::UserProfileStore;

/// Handler for tutor chat turns.
pub struct TutorAssistant {
    profiles: Arc<dyn UserProfileStore>,
}

impl TutorAssistant {
    pub fn new(profiles: Arc<dyn UserProfileStore>) -> Self {
        Self { profiles }
    }

    #[instrument(skip(self, message))]
    pub async fn respond(&self, user_id: &str, message: &str) -> Result<TutorReply, PipelineError> {
        let user_id = UserId::new(user_id)?;

        let intent = classify_intent(message);
        let profile = self.profiles.find_or_new(&user_id).await?;
        let stats = self.profiles.stats(&user_id, Timestamp::now().date()).await?;

        debug!(user_id = %user_id, intent = intent.as_str(), lessons = stats.lesson_count, "Tutor turn");
        Ok(build_reply(
            intent,
            TutorContext {
                profile: &profile,
                stats: &stats,
            },
        ))
    }
}
