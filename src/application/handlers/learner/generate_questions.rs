//! GenerateQuestions - Practice questions from the content provider.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::PipelineError;
use crate::domain::content::DEFAULT_DIFFICULTY;
use crate::domain::foundation::{UserId, ValidationError};
use crate::ports::{ContentProvider, Question, UserProfileStore};

/// Request for a set of practice questions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionRequest {
    pub topic: String,
    /// Defaults to the learner's preferred difficulty, or the middle of the scale.
    #[serde(default)]
    pub difficulty: Option<u8>,
    /// Tailors questions to the learner's knowledge gaps when present.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query handler for practice questions.
pub struct GenerateQuestions {
    provider: Arc<dyn ContentProvider>,
    profiles: Arc<dyn UserProfileStore>,
}

impl GenerateQuestions {
    pub fn new(provider: Arc<dyn ContentProvider>, profiles: Arc<dyn UserProfileStore>) -> Self {
        Self { provider, profiles }
    }

    #[instrument(skip(self, request), fields(topic = %request.topic))]
    pub async fn handle(&self, request: QuestionRequest) -> Result<Vec<Question>, PipelineError> {
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::empty_field("topic").into());
        }
        if let Some(d) = request.difficulty {
            if !(1..=10).contains(&d) {
                return Err(
                    ValidationError::out_of_range("difficulty", 1.0, 10.0, f64::from(d)).into(),
                );
            }
        }

        let profile = match request.user_id {
            Some(user_id) => {
                let user_id = UserId::new(user_id)?;
                match self.profiles.find(&user_id).await {
                    Ok(profile) => profile,
                    Err(err) => {
                        warn!(user_id = %user_id, error = %err, "Profile lookup failed, asking without it");
                        None
                    }
                }
            }
            None => None,
        };

        let difficulty = request
            .difficulty
            .or_else(|| profile.as_ref().map(|p| p.performance_metrics().preferred_difficulty))
            .unwrap_or(DEFAULT_DIFFICULTY);

        let questions = self
            .provider
            .generate_questions(topic, difficulty, profile.as_ref())
            .await
            .map_err(PipelineError::UpstreamGeneration)?;

        info!(count = questions.len(), difficulty, "Questions generated");
        Ok(questions)
    }
}
