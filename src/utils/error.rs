//! Error handling module
//!
//! Defines the server-side error taxonomy and its HTTP mapping. Every
//! variant renders a short, non-leaking `{detail}` body; diagnostic detail
//! is logged, never returned to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed; message is safe to show
    #[error("{0}")]
    Validation(String),

    /// Upstream rejected the configured credentials
    #[error("Authentication with the AI service failed. Please check the configured API credentials.")]
    Authentication,

    /// Upstream rate limit hit
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    /// Upstream could not be reached
    #[error("Unable to connect to the AI service. Please try again later.")]
    UpstreamUnavailable(String),

    /// Upstream returned an API-level error
    #[error("AI service error: {0}")]
    UpstreamApi(String),

    /// Upstream returned structurally invalid output; payload is the
    /// internal diagnostic, never rendered
    #[error("Failed to parse the AI response. The model returned an invalid format.")]
    UpstreamFormat(String),

    /// Anything else
    #[error("An unexpected error occurred.")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication => StatusCode::UNAUTHORIZED,
            AppError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamApi(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamFormat(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Diagnostic detail that must stay in the logs
    pub fn internal_detail(&self) -> Option<&str> {
        match self {
            AppError::UpstreamUnavailable(detail)
            | AppError::UpstreamFormat(detail)
            | AppError::Internal(detail) => Some(detail),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.internal_detail() {
            Some(detail) => {
                tracing::error!("request failed ({}): {} [{}]", status, self, detail)
            }
            None => tracing::warn!("request failed ({}): {}", status, self),
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Authentication.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::RateLimit.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            AppError::UpstreamUnavailable("conn refused".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::UpstreamApi("boom".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::UpstreamFormat("no json".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_error_hides_diagnostic() {
        let err = AppError::UpstreamFormat("raw model text: {oops".into());
        assert!(!err.to_string().contains("oops"));
        assert_eq!(err.internal_detail(), Some("raw model text: {oops"));
    }

    #[test]
    fn test_validation_message_is_shown() {
        let err = AppError::Validation("code must be at least 10 characters long".into());
        assert!(err.to_string().contains("10 characters"));
        assert!(err.internal_detail().is_none());
    }
}
