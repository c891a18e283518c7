//! Review endpoint handlers
//!
//! Validates incoming requests and delegates to the LLM gateway; all
//! failure mapping to HTTP statuses lives in [`AppError`].

use crate::handlers::AppState;
use crate::models::{ComplexityReport, ReviewRequest, ReviewResult, SuggestionsResponse};
use crate::services::complexity;
use crate::utils::error::{AppError, AppResult};
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

/// Review code and provide feedback
///
/// POST /review
pub async fn review_code(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReviewRequest>,
) -> AppResult<Json<ReviewResult>> {
    debug!(
        "Received review request: language={}, code_len={}",
        request.language,
        request.code.len()
    );

    request.validate().map_err(AppError::Validation)?;

    let result = state
        .gateway
        .review_code(&request.code, &request.language, request.context.as_deref())
        .await?;

    Ok(Json(result))
}

/// Get specific improvement suggestions for code
///
/// POST /suggest
pub async fn suggest_improvements(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReviewRequest>,
) -> AppResult<Json<SuggestionsResponse>> {
    debug!(
        "Received suggestion request: language={}, code_len={}",
        request.language,
        request.code.len()
    );

    request.validate().map_err(AppError::Validation)?;

    let suggestions = state
        .gateway
        .suggest_improvements(&request.code, &request.language)
        .await?;

    Ok(Json(SuggestionsResponse { suggestions }))
}

/// Analyze code complexity metrics locally, without the LLM
///
/// POST /complexity
pub async fn analyze_complexity(
    State(_state): State<Arc<AppState>>,
    Json(request): Json<ReviewRequest>,
) -> AppResult<Json<ComplexityReport>> {
    debug!("Received complexity request: code_len={}", request.code.len());

    request.validate().map_err(AppError::Validation)?;

    Ok(Json(complexity::analyze(&request.code)))
}
