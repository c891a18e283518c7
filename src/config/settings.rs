//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use crate::models::TokenParam;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream LLM configuration
    pub llm: LlmConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Endpoint base URL
    pub endpoint: String,
    /// API key; absent means mock mode
    pub api_key: Option<String>,
    /// Deployment (model) name
    pub deployment: String,
    /// API version query parameter
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Completion-length limit for review calls
    pub review_max_tokens: u32,
    /// Completion-length limit for suggestion calls
    pub suggest_max_tokens: u32,
    /// Name under which the completion-length limit is sent
    pub token_param: TokenParam,
    /// Fixed sampling temperature; None omits the parameter entirely
    pub temperature: Option<f32>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let api_key = std::env::var("AZURE_OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8000")
                    .parse()
                    .context("Invalid port number")?,
            },
            llm: LlmConfig {
                endpoint: get_env_or_default("AZURE_OPENAI_ENDPOINT", ""),
                api_key,
                deployment: get_env_or_default("AZURE_OPENAI_DEPLOYMENT", "gpt-5-nano"),
                api_version: get_env_or_default("AZURE_OPENAI_API_VERSION", "2024-08-01-preview"),
                timeout: get_env_or_default("LLM_TIMEOUT", "60")
                    .parse()
                    .context("Invalid timeout value")?,
                review_max_tokens: get_env_or_default("REVIEW_MAX_TOKENS", "2000")
                    .parse()
                    .context("Invalid review token limit")?,
                suggest_max_tokens: get_env_or_default("SUGGEST_MAX_TOKENS", "1000")
                    .parse()
                    .context("Invalid suggestion token limit")?,
                token_param: get_env_or_default("LLM_TOKEN_PARAM", "max_completion_tokens")
                    .parse()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid token parameter name")?,
                temperature: match std::env::var("LLM_TEMPERATURE") {
                    Ok(v) if !v.is_empty() => {
                        Some(v.parse().context("Invalid temperature value")?)
                    }
                    _ => None,
                },
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Endpoint and key only matter outside mock mode
        if let Some(key) = &self.llm.api_key {
            if key.contains(char::is_whitespace) {
                anyhow::bail!("API key cannot contain whitespace characters");
            }
            if key.len() < 8 {
                anyhow::bail!("API key must be at least 8 characters long");
            }
            if !self.llm.endpoint.starts_with("http") {
                anyhow::bail!("Invalid LLM endpoint URL, should start with 'http'");
            }
        }

        if self.llm.timeout == 0 {
            anyhow::bail!("Timeout cannot be 0");
        }

        if self.llm.review_max_tokens == 0 || self.llm.suggest_max_tokens == 0 {
            anyhow::bail!("Completion token limits cannot be 0");
        }

        if let Some(temp) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temp) {
                anyhow::bail!("Temperature must be between 0.0 and 2.0");
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Whether the service answers with canned responses instead of
    /// calling the upstream LLM
    pub fn is_mock_mode(&self) -> bool {
        self.llm.api_key.is_none()
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> Settings {
        Settings {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            llm: LlmConfig {
                endpoint: "https://example.openai.azure.com".to_string(),
                api_key: Some("test-key-123".to_string()),
                deployment: "gpt-5-nano".to_string(),
                api_version: "2024-08-01-preview".to_string(),
                timeout: 60,
                review_max_tokens: 2000,
                suggest_max_tokens: 1000,
                token_param: TokenParam::MaxCompletionTokens,
                temperature: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(base_settings().validate().is_ok());
    }

    #[test]
    fn test_mock_mode() {
        let mut settings = base_settings();
        assert!(!settings.is_mock_mode());
        settings.llm.api_key = None;
        assert!(settings.is_mock_mode());
        // Mock mode skips endpoint/key checks
        settings.llm.endpoint = String::new();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_logging_values_are_loaded() {
        // The subscriber is driven by Settings.logging, so env values must
        // land there rather than being read ad hoc at init time
        std::env::set_var("RUST_LOG", "debug");
        std::env::set_var("LOG_FORMAT", "json");
        let settings = Settings::new().unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, "json");
        std::env::remove_var("RUST_LOG");
        std::env::remove_var("LOG_FORMAT");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut settings = base_settings();
        settings.server.port = 0;
        assert!(settings.validate().is_err());

        let mut settings = base_settings();
        settings.llm.api_key = Some("short".to_string());
        assert!(settings.validate().is_err());

        let mut settings = base_settings();
        settings.llm.temperature = Some(3.0);
        assert!(settings.validate().is_err());

        let mut settings = base_settings();
        settings.logging.format = "xml".to_string();
        assert!(settings.validate().is_err());
    }
}
