//! Configuration module

pub mod settings;

pub use settings::{LlmConfig, LoggingConfig, ServerConfig, Settings};
