//! HTTP handlers for the pipeline API.
//!
//! These handlers connect Axum routes to the application layer. Request
//! bodies arrive as `Result<Json<T>, JsonRejection>` so malformed JSON is
//! reported in the same error envelope as validation failures.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{PipelineError, QuestionRequest};
use crate::domain::content::{CompletionSubmission, ContentRequestInput, RefreshTrigger};
use crate::domain::foundation::{ContentId, ValidationError};

use super::dto::{
    ChatRequest, HealthResponse, QuestionsResponse, RefreshQuery, ResearchUpdatesResponse,
};
use super::error::ApiError;
use super::state::AppState;

fn parse_content_id(raw: &str) -> Result<ContentId, ApiError> {
    ContentId::from_str(raw)
        .map_err(|e| ValidationError::invalid_format("content_id", e.to_string()).into())
}

// ════════════════════════════════════════════════════════════════════════════════
// Content
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/content/generate
pub async fn generate_content(
    State(state): State<AppState>,
    payload: Result<Json<ContentRequestInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let request = input.validate()?;
    let response = state.orchestrator.orchestrate(request).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/completions
pub async fn submit_completion(
    State(state): State<AppState>,
    payload: Result<Json<CompletionSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(submission) = payload?;
    let receipt = state.submit_completion.handle(submission).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /api/content/:id/performance
///
/// Responds with `null` until the item has enough completions to judge.
pub async fn get_performance(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let content_id = parse_content_id(&content_id)?;
    let report = state.analyzer.analyze(content_id).await?;
    Ok(Json(report))
}

/// POST /api/content/:id/refresh
pub async fn refresh_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let content_id = parse_content_id(&content_id)?;
    let outcome = if query.research {
        state
            .refresher
            .refresh_with_research(content_id, RefreshTrigger::Research)
            .await?
    } else {
        state
            .refresher
            .refresh(content_id, RefreshTrigger::Manual)
            .await?
    };
    Ok(Json(outcome))
}

/// POST /api/content/:id/research
///
/// Suggests updates without applying them.
pub async fn suggest_research(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let content_id = parse_content_id(&content_id)?;
    let item = state
        .contents
        .find(content_id)
        .await
        .map_err(PipelineError::from)?
        .ok_or_else(|| PipelineError::not_found("content", content_id))?;

    let updates = state
        .research
        .suggest_updates(content_id, item.topic(), &item.current().content)
        .await;
    Ok(Json(ResearchUpdatesResponse {
        content_id,
        updates,
    }))
}

/// POST /api/refresh
pub async fn refresh_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let summary = state.refresh_all.run().await?;
    Ok(Json(summary))
}

// ════════════════════════════════════════════════════════════════════════════════
// Learner
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/tutor/chat
pub async fn tutor_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(chat) = payload?;
    let reply = state.tutor.respond(&chat.user_id, &chat.message).await?;
    Ok(Json(reply))
}

/// POST /api/questions
pub async fn generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let questions = state.questions.handle(request).await?;
    Ok(Json(QuestionsResponse { questions }))
}

/// GET /api/users/:id/insights
pub async fn learner_insights(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.insights.handle(&user_id).await?;
    Ok(Json(view))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        provider: state.provider_mode,
    })
}
