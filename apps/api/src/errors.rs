#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure modes of the AI analysis path. These never cross the
/// CareerAnalysisService boundary; the service pattern-matches and falls back.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No credentials configured, or all retries exhausted against a
    /// transient failure. Resolved locally by falling back.
    #[error("AI gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// The model's output did not parse into the expected shape after
    /// fence-stripping. The message carries the parser context, not the
    /// payload body.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The outbound request itself was rejected as invalid (4xx other than
    /// 429). Never retried, and logged distinctly as a likely configuration bug.
    #[error("permanent request error (status {status}): {message}")]
    PermanentRequest { status: u16, message: String },
}

/// Application-level error type for the HTTP boundary.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Analysis failures never appear here: CareerAnalysisService is total and
/// resolves them to fallback content before the handler sees anything.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
