//! Axum router configuration for the pipeline API.

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{
    generate_content, generate_questions, get_performance, health, learner_insights,
    refresh_all, refresh_content, submit_completion, suggest_research, tutor_chat,
};
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the pipeline API routes.
///
/// # Routes
///
/// ## Content
/// - `POST /content/generate` - Generate personalized content
/// - `POST /completions` - Record a lesson completion
/// - `GET /content/:id/performance` - Performance report, `null` below the floor
/// - `POST /content/:id/refresh` - Rewrite one item (`?research=true` merges research)
/// - `POST /content/:id/research` - Suggest research updates
/// - `POST /refresh` - Refresh every recently updated item
///
/// ## Learner
/// - `POST /tutor/chat` - Tutor reply for one message
/// - `POST /questions` - Practice questions
/// - `GET /users/:id/insights` - Learner statistics and insights
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/content/generate", post(generate_content))
        .route("/completions", post(submit_completion))
        .route("/content/:id/performance", get(get_performance))
        .route("/content/:id/refresh", post(refresh_content))
        .route("/content/:id/research", post(suggest_research))
        .route("/refresh", post(refresh_all))
        .route("/tutor/chat", post(tutor_chat))
        .route("/questions", post(generate_questions))
        .route("/users/:id/insights", get(learner_insights))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Create the complete application router with middleware.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
