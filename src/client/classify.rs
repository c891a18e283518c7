//! Response error classification
//!
//! Maps non-success HTTP responses from the review backend to typed,
//! user-facing errors. The `/review` and `/suggest` operations carry
//! different fixed wording for 400 and 429; the asymmetry is externally
//! observable and preserved per operation, not unified.

use crate::models::ErrorBody;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Error category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ClientInput,
    Auth,
    RateLimited,
    ServiceUnavailable,
    Network,
    UpstreamFormat,
    Unknown,
}

/// Classified client-side error
///
/// Carries a category tag, a short user-safe message, the originating HTTP
/// status (absent for network-level failures), and optional upstream detail
/// kept for diagnostics only.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub detail: Option<String>,
}

impl ClientError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            detail: None,
        }
    }

    /// Terminal network failure with a fixed, user-safe message
    pub fn network() -> Self {
        Self::new(
            ErrorKind::Network,
            "Network error. Please check your connection and try again.",
        )
    }

    /// Response body could not be interpreted
    pub fn unexpected_response(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UpstreamFormat,
            message: "The review service returned an unexpected response.".to_string(),
            status: None,
            detail: Some(detail.into()),
        }
    }

    /// Request could not be constructed or re-issued
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: "The request could not be sent. Please try again.".to_string(),
            status: None,
            detail: Some(detail.into()),
        }
    }
}

/// Which endpoint the failed request targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Review,
    Suggest,
}

/// Classify a non-success response from the backend
///
/// The body is parsed as JSON on a best-effort basis; a parse failure is
/// treated as an empty body, never as an error of its own.
pub async fn classify_response(operation: Operation, response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or_else(|_| Value::Object(Default::default()));
    classify_error(operation, status, &body)
}

/// Pure classification of status + parsed body
pub fn classify_error(operation: Operation, status: StatusCode, body: &Value) -> ClientError {
    let detail = serde_json::from_value::<ErrorBody>(body.clone())
        .ok()
        .map(|b| b.detail);

    let (kind, message) = match (status.as_u16(), operation) {
        (400, Operation::Review) => (
            ErrorKind::ClientInput,
            detail
                .clone()
                .unwrap_or_else(|| "The code could not be reviewed. Please check your input and try again.".to_string()),
        ),
        (400, Operation::Suggest) => (
            ErrorKind::ClientInput,
            detail
                .clone()
                .unwrap_or_else(|| "Could not generate suggestions for this code.".to_string()),
        ),
        // Auth internals are never surfaced, even when the body has detail
        (401, _) => (
            ErrorKind::Auth,
            "Authentication with the review service failed.".to_string(),
        ),
        (429, Operation::Review) => (
            ErrorKind::RateLimited,
            "Too many review requests. Please wait a moment and try again.".to_string(),
        ),
        (429, Operation::Suggest) => (
            ErrorKind::RateLimited,
            "Suggestion requests are rate limited. Please wait before asking for more.".to_string(),
        ),
        (503, _) => (
            ErrorKind::ServiceUnavailable,
            "The review service is temporarily unavailable. Please try again later.".to_string(),
        ),
        (_, Operation::Review) => (
            ErrorKind::Unknown,
            detail
                .clone()
                .unwrap_or_else(|| "The review request failed unexpectedly. Please try again.".to_string()),
        ),
        (_, Operation::Suggest) => (
            ErrorKind::Unknown,
            detail
                .clone()
                .unwrap_or_else(|| "Could not fetch suggestions. Please try again.".to_string()),
        ),
    };

    ClientError {
        kind,
        message,
        status: Some(status.as_u16()),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_review_400_uses_body_detail() {
        let err = classify_error(
            Operation::Review,
            StatusCode::BAD_REQUEST,
            &json!({"detail": "code must be at least 10 characters long"}),
        );
        assert_eq!(err.kind, ErrorKind::ClientInput);
        assert_eq!(err.message, "code must be at least 10 characters long");
        assert_eq!(err.status, Some(400));
    }

    #[test]
    fn test_review_400_without_detail() {
        let err = classify_error(Operation::Review, StatusCode::BAD_REQUEST, &json!({}));
        assert_eq!(err.kind, ErrorKind::ClientInput);
        assert!(err.message.contains("could not be reviewed"));
    }

    #[test]
    fn test_suggest_400_has_its_own_wording() {
        let err = classify_error(Operation::Suggest, StatusCode::BAD_REQUEST, &json!({}));
        assert_eq!(err.kind, ErrorKind::ClientInput);
        assert_eq!(err.message, "Could not generate suggestions for this code.");
    }

    #[test]
    fn test_401_ignores_body_detail() {
        let err = classify_error(
            Operation::Review,
            StatusCode::UNAUTHORIZED,
            &json!({"detail": "token xyz expired at key-server 10.0.0.3"}),
        );
        assert_eq!(err.kind, ErrorKind::Auth);
        assert!(!err.message.contains("xyz"));
        assert!(!err.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_rate_limit_wording_differs_per_operation() {
        let review = classify_error(Operation::Review, StatusCode::TOO_MANY_REQUESTS, &json!({}));
        let suggest = classify_error(Operation::Suggest, StatusCode::TOO_MANY_REQUESTS, &json!({}));
        assert_eq!(review.kind, ErrorKind::RateLimited);
        assert_eq!(suggest.kind, ErrorKind::RateLimited);
        assert_ne!(review.message, suggest.message);
        assert!(suggest.message.contains("Suggestion"));
    }

    #[test]
    fn test_503_maps_to_service_unavailable() {
        let err = classify_error(Operation::Review, StatusCode::SERVICE_UNAVAILABLE, &json!({}));
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_other_statuses_fold_into_unknown() {
        for code in [402u16, 403, 404, 500, 502] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = classify_error(Operation::Review, status, &json!({}));
            assert_eq!(err.kind, ErrorKind::Unknown, "status {}", code);
            let err = classify_error(Operation::Suggest, status, &json!({}));
            assert_eq!(err.kind, ErrorKind::Unknown, "status {}", code);
        }
    }

    #[test]
    fn test_unknown_carries_body_detail() {
        let err = classify_error(
            Operation::Review,
            StatusCode::BAD_GATEWAY,
            &json!({"detail": "AI service error: overloaded"}),
        );
        assert_eq!(err.message, "AI service error: overloaded");
        assert_eq!(err.detail.as_deref(), Some("AI service error: overloaded"));
    }

    #[test]
    fn test_network_error_message_is_fixed() {
        let err = ClientError::network();
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.status.is_none());
        assert_eq!(
            err.to_string(),
            "Network error. Please check your connection and try again."
        );
    }
}
