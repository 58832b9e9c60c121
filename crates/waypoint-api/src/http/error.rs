//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use waypoint_types::error::{RepositoryError, TurnError};
use waypoint_types::llm::LlmError;
use waypoint_types::search::SearchError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Turn processing errors.
    Turn(TurnError),
    /// Search execution errors.
    Search(SearchError),
    /// Session repository errors.
    Session(RepositoryError),
    /// Validation error on the incoming request.
    Validation(String),
    /// The feature is disabled because its credential is not configured.
    FeatureUnavailable(&'static str),
    /// Generic internal error.
    Internal(String),
}

impl From<TurnError> for AppError {
    fn from(e: TurnError) -> Self {
        AppError::Turn(e)
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::Search(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Session(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // A malformed upstream judgment surfaces as a generic
            // processing error; the raw details stay in the logs.
            AppError::Turn(TurnError::MalformedJudgment(detail)) => {
                tracing::warn!(detail = %detail, "Malformed judgment from inference service");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROCESSING_ERROR",
                    "Failed to process the request".to_string(),
                )
            }
            AppError::Turn(TurnError::TurnInProgress) => (
                StatusCode::CONFLICT,
                "TURN_IN_PROGRESS",
                "A turn is already in flight for this session".to_string(),
            ),
            AppError::Turn(TurnError::Unavailable) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "FEATURE_UNAVAILABLE",
                "Chat is not available: no inference credential configured".to_string(),
            ),
            AppError::Turn(TurnError::Llm(LlmError::RateLimited)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_RATE_LIMITED",
                "The inference service is rate limiting requests".to_string(),
            ),
            AppError::Turn(TurnError::Llm(e)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                e.to_string(),
            ),
            AppError::Search(SearchError::Unavailable) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "FEATURE_UNAVAILABLE",
                "Place search is not available: no places credential configured".to_string(),
            ),
            AppError::Search(e) => (StatusCode::BAD_GATEWAY, "SEARCH_ERROR", e.to_string()),
            AppError::Session(RepositoryError::NotFound) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Session(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SESSION_ERROR",
                e.to_string(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::FeatureUnavailable(feature) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "FEATURE_UNAVAILABLE",
                format!("{feature} is not available: credential not configured"),
            ),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
