//! Mapping from pipeline errors to HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::dto::ErrorResponse;
use crate::application::PipelineError;
use crate::domain::foundation::ValidationError;

/// Error returned by every API handler.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(PipelineError::Validation(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::invalid_format("body", rejection.body_text()).into()
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            PipelineError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            PipelineError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PipelineError::UpstreamGeneration(_) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_GENERATION_FAILED")
            }
            PipelineError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let details = match &self.0 {
            PipelineError::Validation(err) => err.to_string(),
            PipelineError::UpstreamGeneration(err) => err.to_string(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.0, "Request failed");
        }
        (status, Json(ErrorResponse::new(code, details))).into_response()
    }
}
