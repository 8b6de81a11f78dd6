//! Shared doubles and wiring for handler tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::adapters::ai::MockContentProvider;
use crate::adapters::memory::{
    InMemoryCompletionRepository, InMemoryContentRepository, InMemoryUserProfileStore,
};
use crate::domain::content::{
    CompletionRecord, ContentItem, ContentType, GeneratedContent,
};
use crate::domain::content::generated::fixtures::sample_content;
use crate::domain::foundation::{ContentId, Timestamp, UserId};
use crate::domain::prompt::PromptSpec;
use crate::domain::user::fixtures::outcomes_now;
use crate::domain::user::{LessonOutcome, UserProfile};
use crate::ports::{
    AIError, CompletionRepository, ContentProvider, ContentRepository, NotificationError,
    NotificationSink, PerformanceInsights, ProviderError, ProviderMode, Question,
    UserProfileStore,
};

/// In-memory adapters shared by a test.
#[derive(Clone, Default)]
pub struct Stores {
    pub profiles: Arc<InMemoryUserProfileStore>,
    pub contents: Arc<InMemoryContentRepository>,
    pub completions: Arc<InMemoryCompletionRepository>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a lesson on `topic` and returns its id.
    pub async fn seed_content(&self, topic: &str, updated_at: Timestamp) -> ContentId {
        let item = ContentItem::new(
            ContentId::new(),
            ContentType::Lesson,
            topic,
            "intermediate",
            sample_content(),
            updated_at,
        );
        let id = item.id();
        self.contents.insert(item).await.unwrap();
        id
    }

    pub async fn seed_completions(&self, records: Vec<CompletionRecord>) {
        for record in records {
            self.completions.append(record).await.unwrap();
        }
    }

    /// Records one lesson outcome per `(topic, score)` pair for `user_id`.
    pub async fn seed_outcomes(&self, user_id: &str, scores: &[(&str, f64)]) {
        let user_id = UserId::new(user_id).unwrap();
        for outcome in outcomes_now(scores) {
            self.profiles.record_outcome(&user_id, outcome).await.unwrap();
        }
    }
}

pub fn mock_provider() -> Arc<dyn ContentProvider> {
    Arc::new(MockContentProvider::new())
}

/// Provider whose every call fails with a retry-exhausted upstream error.
pub struct FailingProvider;

#[async_trait]
impl ContentProvider for FailingProvider {
    async fn generate(&self, _prompt: &PromptSpec) -> Result<GeneratedContent, ProviderError> {
        Err(ProviderError::Upstream(AIError::unavailable("upstream down")))
    }

    async fn generate_questions(
        &self,
        _topic: &str,
        _difficulty: u8,
        _profile: Option<&UserProfile>,
    ) -> Result<Vec<Question>, ProviderError> {
        Err(ProviderError::Upstream(AIError::unavailable("upstream down")))
    }

    async fn analyze_performance(
        &self,
        _history: &[LessonOutcome],
    ) -> Result<PerformanceInsights, ProviderError> {
        Err(ProviderError::Upstream(AIError::unavailable("upstream down")))
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Live
    }
}

/// Records every prompt and delegates to the mock provider.
#[derive(Default)]
pub struct RecordingProvider {
    inner: MockContentProvider,
    prompts: Mutex<Vec<PromptSpec>>,
}

impl RecordingProvider {
    pub fn prompts(&self) -> Vec<PromptSpec> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentProvider for RecordingProvider {
    async fn generate(&self, prompt: &PromptSpec) -> Result<GeneratedContent, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.inner.generate(prompt).await
    }

    async fn generate_questions(
        &self,
        topic: &str,
        difficulty: u8,
        profile: Option<&UserProfile>,
    ) -> Result<Vec<Question>, ProviderError> {
        self.inner.generate_questions(topic, difficulty, profile).await
    }

    async fn analyze_performance(
        &self,
        history: &[LessonOutcome],
    ) -> Result<PerformanceInsights, ProviderError> {
        self.inner.analyze_performance(history).await
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Mock
    }
}

/// Notification sink that keeps messages, optionally failing every delivery.
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.messages.lock().unwrap().push(message.to_string());
        if self.fail {
            return Err(NotificationError::Rejected { status: 500 });
        }
        Ok(())
    }
}
