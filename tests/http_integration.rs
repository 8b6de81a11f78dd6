//! Integration tests for the pipeline HTTP API.
//!
//! Drives the full router with the mock provider and in-memory stores:
//! 1. Content generation and request validation
//! 2. Completion telemetry and performance reports
//! 3. Refresh and research endpoints
//! 4. Tutor chat, questions and insights

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use adaptive_content::adapters::ai::MockContentProvider;
use adaptive_content::adapters::http::{build_router, AppState, Dependencies};
use adaptive_content::adapters::memory::{
    InMemoryCompletionRepository, InMemoryContentRepository, InMemoryUserProfileStore,
};
use adaptive_content::adapters::notification::LoggingNotificationSink;
use adaptive_content::adapters::research::SimulatedResearchSource;
use adaptive_content::config::{PipelineConfig, ServerConfig};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let deps = Dependencies {
        provider: Arc::new(MockContentProvider::new()),
        profiles: Arc::new(InMemoryUserProfileStore::new()),
        contents: Arc::new(InMemoryContentRepository::new()),
        completions: Arc::new(InMemoryCompletionRepository::new()),
        research: Arc::new(SimulatedResearchSource::new()),
        notifier: Arc::new(LoggingNotificationSink),
    };
    let pipeline = PipelineConfig {
        refresh_item_delay_ms: 0,
        ..Default::default()
    };
    build_router(AppState::new(deps, &pipeline), &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn generate(app: &Router, topic: &str, audience: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/content/generate",
        Some(json!({ "type": "lesson", "topic": topic, "audience": audience })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["metadata"]["content_id"].as_str().unwrap().to_string()
}

async fn complete(app: &Router, content_id: &str, completion: Value) -> StatusCode {
    let mut payload = json!({
        "user_id": "learner-1",
        "content_id": content_id,
        "score": 85.0,
        "time_spent": 600,
        "satisfaction_rating": 4,
        "difficulty_rating": 5,
        "engagement_score": 8
    });
    if let (Some(base), Some(overrides)) = (payload.as_object_mut(), completion.as_object()) {
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
    }
    send(app, "POST", "/api/completions", Some(payload)).await.0
}

// =============================================================================
// Content generation
// =============================================================================

#[tokio::test]
async fn beginner_request_is_generated_at_difficulty_three() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/content/generate",
        Some(json!({ "type": "lesson", "topic": "Closures", "audience": "beginner" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"]["difficulty_level"], 3);
    assert_eq!(body["content"]["metadata"]["confidence"], 0.85);
    assert_eq!(body["metadata"]["revision"], 1);
    assert_eq!(body["metadata"]["provider"], "mock");
    assert_eq!(body["metadata"]["personalization_applied"], false);
    assert_eq!(body["analytics"]["confidence_score"], 0.85);
    assert!(body["recommendations"].is_null());
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/content/generate",
        Some(json!({ "topic": "Closures" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("type"));
    assert!(details.contains("audience"));
    assert!(!details.contains("topic"));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/content/generate")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Completions and performance
// =============================================================================

#[tokio::test]
async fn performance_is_null_until_enough_completions() {
    let app = app();
    let content_id = generate(&app, "Iterators", "intermediate").await;
    for _ in 0..4 {
        assert_eq!(complete(&app, &content_id, json!({})).await, StatusCode::CREATED);
    }

    let uri = format!("/api/content/{content_id}/performance");
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    assert_eq!(complete(&app, &content_id, json!({})).await, StatusCode::CREATED);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 85.0);
    assert_eq!(body["status"], "needs_improvement");
    assert_eq!(body["needs_regeneration"], true);
    assert_eq!(body["sample_size"], 5);
}

#[tokio::test]
async fn out_of_range_completion_is_rejected() {
    let app = app();
    let content_id = generate(&app, "Iterators", "intermediate").await;

    let status = complete(&app, &content_id, json!({ "satisfaction_rating": 6 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = complete(&app, &content_id, json!({ "score": 150.5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn completion_for_unknown_content_is_not_found() {
    let app = app();
    let status = complete(&app, "00000000-0000-4000-8000-000000000000", json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_content_id_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/content/not-a-uuid/performance", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_FAILED");
}

// =============================================================================
// Refresh and research
// =============================================================================

#[tokio::test]
async fn refresh_ranks_suggestions_and_bumps_revision() {
    let app = app();
    let content_id = generate(&app, "Lifetimes", "advanced").await;
    for _ in 0..5 {
        complete(
            &app,
            &content_id,
            json!({
                "score": 40.0,
                "satisfaction_rating": 2,
                "engagement_score": 3,
                "difficulty_rating": 9
            }),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/content/{content_id}/refresh"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["revision"], 2);
    assert_eq!(body["trigger"], "manual");
    let areas: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["area"].as_str().unwrap())
        .collect();
    assert_eq!(areas, vec!["content", "engagement", "difficulty"]);
}

#[tokio::test]
async fn refresh_with_research_merges_relevant_updates() {
    let app = app();
    let content_id = generate(&app, "Async Rust", "intermediate").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/content/{content_id}/refresh?research=true"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["trigger"], "research");
    assert_eq!(body["research_updates_applied"], 3);
    assert_eq!(body["skipped_expired"], 0);
}

#[tokio::test]
async fn research_suggestions_are_relevant_and_prioritized() {
    let app = app();
    let content_id = generate(&app, "Async Rust", "intermediate").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/content/{content_id}/research"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updates = body["updates"].as_array().unwrap();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0]["priority"], "critical");
    assert!(updates
        .iter()
        .all(|u| u["content_id"].as_str() == Some(content_id.as_str())));
}

#[tokio::test]
async fn refresh_all_reports_summary() {
    let app = app();
    generate(&app, "Traits", "intermediate").await;

    let (status, body) = send(&app, "POST", "/api/refresh", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analyzed"], 1);
    assert_eq!(body["skipped"], 1);
    assert_eq!(body["updated"], 0);
}

// =============================================================================
// Learner
// =============================================================================

#[tokio::test]
async fn tutor_classifies_intents() {
    let app = app();
    let cases = [
        ("What should I learn next?", "recommend_next"),
        ("How am I doing?", "show_progress"),
        ("I'm stuck", "provide_help"),
        ("", "general_chat"),
    ];

    for (message, intent) in cases {
        let (status, body) = send(
            &app,
            "POST",
            "/api/tutor/chat",
            Some(json!({ "user_id": "learner-1", "message": message })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intent"], intent, "message: {message:?}");
    }
}

#[tokio::test]
async fn questions_respect_requested_difficulty() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/questions",
        Some(json!({ "topic": "Pattern matching", "difficulty": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["difficulty"], 4);
}

#[tokio::test]
async fn insights_for_new_learner() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/users/learner-9/insights", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "learner-9");
    assert_eq!(body["insights"]["difficulty_adjustment"], 0);
}

#[tokio::test]
async fn health_reports_provider_mode() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "mock");
}
