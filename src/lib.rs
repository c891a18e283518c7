//! Code Review Assistant
//!
//! AI-powered code review backend plus a resilient client library for it.
//! The backend forwards code snippets to a hosted chat-completion LLM and
//! relays back a structured review; the client module retries transient
//! failures and classifies everything else into typed errors.

pub mod client;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use client::{ApiClient, ClientConfig, ClientError, ErrorKind, RetryPolicy, ReviewSession};
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{ReviewRequest, ReviewResult, Suggestion, SuggestionsResponse};
pub use services::LlmGateway;
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
