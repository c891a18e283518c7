//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod review;

use crate::config::Settings;
use crate::middleware::logging::request_logging;
use crate::services::LlmGateway;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Maximum accepted request body size in bytes
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub gateway: LlmGateway,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let gateway = LlmGateway::new(settings.clone())?;

    let app_state = Arc::new(AppState { settings, gateway });

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let router = Router::new()
        .route("/review", post(review::review_code))
        .route("/suggest", post(review::suggest_improvements))
        .route("/complexity", post(review::analyze_complexity))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware_stack)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn(request_logging));

    Ok(router)
}
