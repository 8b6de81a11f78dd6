//! HTTP adapter - REST API over the application handlers.

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use dto::{
    ChatRequest, ErrorResponse, HealthResponse, QuestionsResponse, RefreshQuery,
    ResearchUpdatesResponse,
};
pub use error::ApiError;
pub use routes::{api_routes, build_router};
pub use state::{AppState, Dependencies};
