//! Live Content Provider - Structured content over a text-completion service.
//!
//! Every call is a system + user message pair requesting a JSON object.
//! A call is bounded by a per-attempt deadline and retried by `RetryPolicy`;
//! output that fails to parse or validate counts as a failed attempt.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::adapters::retry::RetryPolicy;
use crate::domain::content::{
    map_audience_to_difficulty, ContentMetadata, ContentSection, GeneratedContent,
    InteractiveElement,
};
use crate::domain::foundation::Timestamp;
use crate::domain::prompt::PromptSpec;
use crate::domain::user::{LessonOutcome, UserProfile};
use crate::ports::{
    CompletionRequest, CompletionResponse, ContentProvider, FinishReason, MessageRole,
    PerformanceInsights, ProviderError, ProviderMode, Question, TextCompletion,
};

/// Confidence before adjusting for how the completion finished.
pub const BASE_CONFIDENCE: f64 = 0.8;

/// Deadline for one completion attempt.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

const GENERATION_TEMPERATURE: f32 = 0.7;
const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Confidence in a completion given its finish reason.
///
/// Clean stop adds 0.15, length truncation adds nothing, anything else
/// subtracts 0.2.
pub fn confidence_for(finish_reason: FinishReason) -> f64 {
    let adjustment = match finish_reason {
        FinishReason::Stop => 0.15,
        FinishReason::Length => 0.0,
        FinishReason::ContentFilter | FinishReason::Other => -0.2,
    };
    (BASE_CONFIDENCE + adjustment).clamp(0.0, 1.0)
}

/// Content provider backed by a `TextCompletion` service.
pub struct LiveContentProvider {
    completion: Arc<dyn TextCompletion>,
    retry: RetryPolicy,
    call_timeout: Duration,
}

impl LiveContentProvider {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self {
            completion,
            retry: RetryPolicy::default(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Runs one completion under the retry policy, parsing each attempt.
    async fn complete_parsed<T, F>(
        &self,
        request: CompletionRequest,
        parse: F,
    ) -> Result<T, ProviderError>
    where
        F: Fn(CompletionResponse) -> Result<T, ProviderError>,
    {
        self.retry
            .execute_when(
                || {
                    let request = request.clone();
                    let parse = &parse;
                    async move { parse(self.attempt(request).await?) }
                },
                ProviderError::is_retryable,
            )
            .await
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        match tokio::time::timeout(self.call_timeout, self.completion.complete(request)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(ProviderError::Timeout {
                timeout_secs: self.call_timeout.as_secs(),
            }),
        }
    }
}

fn json_request(system: &str, user: &str, temperature: f32) -> CompletionRequest {
    CompletionRequest::new(uuid::Uuid::new_v4().to_string())
        .with_message(MessageRole::System, system)
        .with_message(MessageRole::User, user)
        .with_temperature(temperature)
        .with_json_response()
}

#[async_trait]
impl ContentProvider for LiveContentProvider {
    #[instrument(skip(self, prompt), fields(topic = %prompt.topic, task = ?prompt.task))]
    async fn generate(&self, prompt: &PromptSpec) -> Result<GeneratedContent, ProviderError> {
        let fallback_difficulty = prompt
            .param("difficulty")
            .and_then(|d| d.parse().ok())
            .unwrap_or_else(|| map_audience_to_difficulty(&prompt.audience));

        let request = json_request(&prompt.system, &prompt.user, GENERATION_TEMPERATURE);
        let content = self
            .complete_parsed(request, |response| {
                parse_content(&response, fallback_difficulty, Timestamp::now())
            })
            .await?;

        debug!(title = %content.title, confidence = content.metadata.confidence, "Content generated");
        Ok(content)
    }

    async fn generate_questions(
        &self,
        topic: &str,
        difficulty: u8,
        profile: Option<&UserProfile>,
    ) -> Result<Vec<Question>, ProviderError> {
        let mut user = format!(
            "Write 5 multiple-choice questions about \"{}\" at difficulty {}/10.",
            topic, difficulty
        );
        if let Some(profile) = profile {
            if !profile.knowledge_gaps().is_empty() {
                let gaps: Vec<&str> = profile.knowledge_gaps().iter().map(String::as_str).collect();
                user.push_str(&format!(" Probe these gaps: {}.", gaps.join(", ")));
            }
        }
        let system = "Respond with a JSON object {\"questions\": [{prompt, options, \
                      correct_index, explanation, difficulty}]}.";

        let request = json_request(system, &user, GENERATION_TEMPERATURE);
        self.complete_parsed(request, |response| {
            let set: QuestionSet = parse_json(&response.content)?;
            let questions: Vec<Question> = set
                .questions
                .into_iter()
                .filter(|q| q.correct_index < q.options.len())
                .collect();
            if questions.is_empty() {
                return Err(ProviderError::parse("no usable questions"));
            }
            Ok(questions)
        })
        .await
    }

    async fn analyze_performance(
        &self,
        history: &[LessonOutcome],
    ) -> Result<PerformanceInsights, ProviderError> {
        let mut user = String::from("Analyze this learner's lesson history:\n");
        for outcome in history {
            user.push_str(&format!(
                "- {} scored {:.0} on {}\n",
                outcome.topic,
                outcome.score.value(),
                outcome.completed_at.date()
            ));
        }
        let system = "Respond with a JSON object {insights, recommendations, knowledge_gaps, \
                      strengths, next_learning_path, difficulty_adjustment (-2..2)}.";

        let request = json_request(system, &user, ANALYSIS_TEMPERATURE);
        self.complete_parsed(request, |response| {
            parse_json::<PerformanceInsights>(&response.content).map(PerformanceInsights::normalized)
        })
        .await
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Live
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response parsing
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct RawContent {
    title: String,
    #[serde(default)]
    description: String,
    sections: Vec<ContentSection>,
    #[serde(default)]
    difficulty_level: Option<u8>,
    #[serde(default)]
    interactive_elements: Vec<InteractiveElement>,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
struct QuestionSet {
    questions: Vec<Question>,
}

fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ProviderError> {
    serde_json::from_str(strip_code_fence(content))
        .map_err(|e| ProviderError::parse(e.to_string()))
}

/// Some models wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn parse_content(
    response: &CompletionResponse,
    fallback_difficulty: u8,
    generated_at: Timestamp,
) -> Result<GeneratedContent, ProviderError> {
    let raw: RawContent = parse_json(&response.content)?;
    let content = GeneratedContent {
        title: raw.title,
        description: raw.description,
        sections: raw.sections,
        difficulty_level: raw.difficulty_level.unwrap_or(fallback_difficulty),
        interactive_elements: raw.interactive_elements,
        metadata: ContentMetadata {
            tags: raw.metadata.tags,
            category: raw.metadata.category,
            confidence: confidence_for(response.finish_reason),
            generated_at,
        },
    };
    content
        .validate()
        .map_err(|e| ProviderError::parse(e.to_string()))?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::ScriptedCompletion;
    use crate::domain::content::{ContentRequest, ContentType};
    use crate::domain::prompt::PromptBuilder;
    use crate::ports::AIError;

    const VALID: &str = r#"{
        "title": "Borrowing in Rust",
        "description": "References without ownership",
        "sections": [{"heading": "Shared borrows", "body": "Many readers."}],
        "difficulty_level": 6,
        "metadata": {"tags": ["rust"], "category": "programming"}
    }"#;

    fn prompt() -> PromptSpec {
        let request = ContentRequest::new(ContentType::Lesson, "Borrowing", "intermediate").unwrap();
        PromptBuilder::build(&request, None, &[], &[])
    }

    fn provider(completion: ScriptedCompletion) -> LiveContentProvider {
        LiveContentProvider::new(Arc::new(completion))
            .with_retry(RetryPolicy::new(3, Duration::from_millis(10)))
    }

    #[test]
    fn confidence_follows_finish_reason() {
        assert!((confidence_for(FinishReason::Stop) - 0.95).abs() < 1e-9);
        assert!((confidence_for(FinishReason::Length) - 0.8).abs() < 1e-9);
        assert!((confidence_for(FinishReason::Other) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {} "), "{}");
    }

    #[tokio::test]
    async fn generate_parses_json_and_sets_confidence() {
        let completion = ScriptedCompletion::new().with_response(VALID);
        let content = provider(completion.clone()).generate(&prompt()).await.unwrap();

        assert_eq!(content.title, "Borrowing in Rust");
        assert_eq!(content.difficulty_level, 6);
        assert!((content.metadata.confidence - 0.95).abs() < 1e-9);

        let calls = completion.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].json_response);
        assert_eq!(calls[0].messages.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_json_is_retried_until_it_parses() {
        let completion = ScriptedCompletion::new()
            .with_response("not json")
            .with_response(VALID);
        let content = provider(completion.clone()).generate(&prompt()).await.unwrap();

        assert_eq!(content.title, "Borrowing in Rust");
        assert_eq!(completion.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_failures_surface_the_last_error() {
        let completion = ScriptedCompletion::new()
            .with_error(AIError::unavailable("first"))
            .with_error(AIError::unavailable("second"))
            .with_error(AIError::unavailable("third"));
        let err = provider(completion.clone()).generate(&prompt()).await.unwrap_err();

        assert_eq!(completion.call_count(), 3);
        assert_eq!(err, ProviderError::Upstream(AIError::unavailable("third")));
    }

    #[tokio::test(start_paused = true)]
    async fn authentication_failure_is_not_retried() {
        let completion = ScriptedCompletion::new().with_error(AIError::AuthenticationFailed);
        let err = provider(completion.clone()).generate(&prompt()).await.unwrap_err();

        assert_eq!(completion.call_count(), 1);
        assert!(!err.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_calls_time_out() {
        let completion = ScriptedCompletion::new()
            .with_response(VALID)
            .with_delay(Duration::from_secs(60));
        let err = LiveContentProvider::new(Arc::new(completion))
            .with_retry(RetryPolicy::new(1, Duration::ZERO))
            .with_call_timeout(Duration::from_secs(30))
            .generate(&prompt())
            .await
            .unwrap_err();

        assert_eq!(err, ProviderError::Timeout { timeout_secs: 30 });
    }

    #[tokio::test]
    async fn missing_difficulty_falls_back_to_audience_mapping() {
        let body = r#"{"title": "T", "sections": [{"heading": "h", "body": "b"}]}"#;
        let completion = ScriptedCompletion::new().with_response(body);
        let content = provider(completion).generate(&prompt()).await.unwrap();
        assert_eq!(content.difficulty_level, 6);
    }

    #[tokio::test]
    async fn analyze_performance_clamps_adjustment() {
        let body = r#"{"insights": ["steady"], "difficulty_adjustment": 5}"#;
        let completion = ScriptedCompletion::new().with_response(body);
        let insights = provider(completion).analyze_performance(&[]).await.unwrap();
        assert_eq!(insights.difficulty_adjustment, 2);
        assert_eq!(insights.insights, vec!["steady".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn questions_with_out_of_range_answers_are_dropped() {
        let body = r#"{"questions": [
            {"prompt": "p", "options": ["a", "b"], "correct_index": 5, "explanation": "", "difficulty": 4},
            {"prompt": "q", "options": ["a", "b"], "correct_index": 1, "explanation": "b", "difficulty": 4}
        ]}"#;
        let completion = ScriptedCompletion::new().with_response(body);
        let questions = provider(completion)
            .generate_questions("rust", 4, None)
            .await
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "q");
    }
}
