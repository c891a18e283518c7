//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check details
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Upstream LLM status ("configured" or "mock")
    pub upstream: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let upstream = if state.settings.is_mock_mode() {
        "mock".to_string()
    } else {
        "configured".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "code-review-assistant".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            upstream,
            uptime_seconds: START_TIME.elapsed().as_secs(),
        }),
    })
}

/// Liveness check
///
/// GET /health/live
pub async fn liveness_check(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        service: "code-review-assistant".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: None,
    })
}
