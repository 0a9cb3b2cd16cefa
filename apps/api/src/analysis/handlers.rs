//! Axum route handlers for the Analysis API.
//!
//! Thin by design: validate the request shape, delegate to
//! CareerAnalysisService, serialize the result. The service is total, so
//! these handlers only ever fail on request validation.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::profile::StudentProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RiasecRequest {
    pub student_id: Option<String>,
    pub responses: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/v1/analysis/career
///
/// Career guidance for a student profile. Any subset of profile fields may be
/// absent; the analysis degrades gracefully rather than rejecting.
pub async fn handle_career(
    State(state): State<AppState>,
    Json(profile): Json<StudentProfile>,
) -> Json<AnalysisResult> {
    Json(state.service.recommend_careers(&profile).await)
}

/// POST /api/v1/analysis/riasec
///
/// Scores a RIASEC assessment from free-text responses. A submission for a
/// known student invalidates their previously cached analyses.
pub async fn handle_riasec(
    State(state): State<AppState>,
    Json(request): Json<RiasecRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.responses.is_empty() {
        return Err(AppError::Validation(
            "responses cannot be empty".to_string(),
        ));
    }

    let result = state
        .service
        .analyze_riasec(request.student_id.as_deref(), &request.responses)
        .await;
    Ok(Json(result))
}

/// POST /api/v1/analysis/learning-path
pub async fn handle_learning_path(
    State(state): State<AppState>,
    Json(profile): Json<StudentProfile>,
) -> Json<AnalysisResult> {
    Json(state.service.learning_path(&profile).await)
}

/// POST /api/v1/analysis/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    Ok(Json(state.service.chat(&request.message).await))
}
