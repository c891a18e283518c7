//! Code Review Assistant server
//!
//! HTTP service that reviews code snippets through a hosted LLM

use anyhow::{Context, Result};
use codereview::config::{LoggingConfig, Settings};
use codereview::handlers::create_router;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings load first so .env-provided logging values take effect
    let settings = Settings::new().context("Failed to load settings")?;
    init_logging(&settings.logging);

    info!("Settings loaded");
    if settings.is_mock_mode() {
        info!("No upstream API key configured, serving mock reviews");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let app = create_router(settings).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Code review assistant started on {}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Review endpoint: http://{}/review", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// Initialize logging system from the validated configuration
fn init_logging(config: &LoggingConfig) {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.clone())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.clone())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
