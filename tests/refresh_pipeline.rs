//! Integration tests for the generate, complete and refresh loop.
//!
//! These tests wire the application handlers directly against the
//! in-memory adapters and the mock provider.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use adaptive_content::adapters::ai::MockContentProvider;
use adaptive_content::adapters::memory::{
    InMemoryCompletionRepository, InMemoryContentRepository, InMemoryUserProfileStore,
};
use adaptive_content::adapters::research::SimulatedResearchSource;
use adaptive_content::application::{
    ContentOrchestrator, ContentRefresher, PerformanceAnalyzer, RefreshAll, ResearchAdvisor,
    SubmitCompletion,
};
use adaptive_content::domain::content::{
    CompletionSubmission, ContentRequest, ContentType, RefreshTrigger,
};
use adaptive_content::domain::foundation::{ContentId, Timestamp};
use adaptive_content::domain::research::{
    ExpiryPolicy, ResearchPriority, ResearchUpdate, SectionUpdate, UpdateType,
};
use adaptive_content::ports::{ContentRepository, NotificationError, NotificationSink};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

struct Pipeline {
    contents: Arc<InMemoryContentRepository>,
    orchestrator: ContentOrchestrator,
    submit: SubmitCompletion,
    refresher: Arc<ContentRefresher>,
    refresh_all: RefreshAll,
    sink: Arc<RecordingSink>,
}

impl Pipeline {
    fn new() -> Self {
        let provider = Arc::new(MockContentProvider::new());
        let profiles = Arc::new(InMemoryUserProfileStore::new());
        let contents = Arc::new(InMemoryContentRepository::new());
        let completions = Arc::new(InMemoryCompletionRepository::new());
        let sink = Arc::new(RecordingSink::default());

        let advisor = Arc::new(ResearchAdvisor::new(
            Arc::new(SimulatedResearchSource::new()),
            ExpiryPolicy::default(),
        ));
        let analyzer = Arc::new(PerformanceAnalyzer::new(contents.clone(), completions.clone()));
        let refresher = Arc::new(ContentRefresher::new(
            provider.clone(),
            contents.clone(),
            completions.clone(),
            advisor,
        ));
        let refresh_all = RefreshAll::new(
            contents.clone(),
            analyzer,
            refresher.clone(),
            sink.clone(),
        )
        .with_item_delay(Duration::ZERO);

        Self {
            orchestrator: ContentOrchestrator::new(
                provider,
                profiles.clone(),
                contents.clone(),
                completions.clone(),
            ),
            submit: SubmitCompletion::new(contents.clone(), completions, profiles),
            contents,
            refresher,
            refresh_all,
            sink,
        }
    }

    async fn generate(&self, topic: &str) -> ContentId {
        let request = ContentRequest::new(ContentType::Lesson, topic, "intermediate").unwrap();
        let response = self.orchestrator.orchestrate(request).await.unwrap();
        response.metadata.content_id
    }

    async fn complete(&self, content_id: ContentId, score: f64, times: usize) {
        for i in 0..times {
            self.submit
                .handle(CompletionSubmission {
                    user_id: format!("learner-{i}"),
                    content_id,
                    score,
                    time_spent: 600,
                    satisfaction_rating: 3,
                    difficulty_rating: 5,
                    engagement_score: 7,
                    feedback_text: Some("The middle section felt rushed".to_string()),
                    lesson_quality_metrics: None,
                })
                .await
                .unwrap();
        }
    }
}

fn update(content_id: ContentId, expiry_date: Timestamp) -> ResearchUpdate {
    ResearchUpdate {
        content_id,
        update_type: UpdateType::NewsIntegration,
        priority: ResearchPriority::High,
        content_updates: vec![SectionUpdate {
            section: "Introduction".to_string(),
            new_content: "A new release changed the defaults".to_string(),
            source_urls: vec!["https://news.example.org/release".to_string()],
            confidence: 0.9,
        }],
        research_summary: "New release".to_string(),
        expiry_date,
    }
}

// =============================================================================
// Refresh-all
// =============================================================================

#[tokio::test]
async fn refresh_all_rewrites_items_averaging_below_ninety_and_notifies() {
    let pipeline = Pipeline::new();
    let weak = pipeline.generate("SQL Joins").await;
    let strong = pipeline.generate("Recursion").await;
    let fresh = pipeline.generate("Generics").await;
    pipeline.complete(weak, 85.0, 5).await;
    pipeline.complete(strong, 90.0, 5).await;
    pipeline.complete(fresh, 30.0, 2).await;

    let summary = pipeline.refresh_all.run().await.unwrap();

    assert_eq!(summary.analyzed, 3);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);

    let weak_item = pipeline.contents.find(weak).await.unwrap().unwrap();
    assert_eq!(weak_item.revision_number(), 2);
    assert_eq!(weak_item.improvement_log()[0].trigger, RefreshTrigger::Performance);
    assert_eq!(weak_item.improvement_log()[0].feedback_count, 5);

    let strong_item = pipeline.contents.find(strong).await.unwrap().unwrap();
    assert_eq!(strong_item.revision_number(), 1);

    let messages = pipeline.sink.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("1 updated"));
}

// =============================================================================
// Research expiry
// =============================================================================

#[tokio::test]
async fn expired_research_is_never_merged() {
    let pipeline = Pipeline::new();
    let content_id = pipeline.generate("Async Rust").await;
    let now = Timestamp::now();

    let outcome = pipeline
        .refresher
        .refresh_with_updates(
            content_id,
            vec![
                update(content_id, now.minus_days(1)),
                update(content_id, now.plus_days(30)),
            ],
            RefreshTrigger::Research,
        )
        .await
        .unwrap();

    assert_eq!(outcome.research_updates_applied, 1);
    assert_eq!(outcome.skipped_expired, 1);

    let item = pipeline.contents.find(content_id).await.unwrap().unwrap();
    assert_eq!(item.revision_number(), 2);
    assert_eq!(item.improvement_log()[0].research_updates_applied, 1);
}

#[tokio::test]
async fn refresh_with_only_expired_updates_still_commits_one_revision() {
    let pipeline = Pipeline::new();
    let content_id = pipeline.generate("Macros").await;

    let outcome = pipeline
        .refresher
        .refresh_with_updates(
            content_id,
            vec![update(content_id, Timestamp::now().minus_days(3))],
            RefreshTrigger::Research,
        )
        .await
        .unwrap();

    assert_eq!(outcome.revision, 2);
    assert_eq!(outcome.research_updates_applied, 0);
    assert_eq!(outcome.skipped_expired, 1);
}
