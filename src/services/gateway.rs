//! Upstream LLM gateway
//!
//! Orchestrates one chat-completion call per logical operation and converts
//! every upstream failure mode into a typed [`AppError`] instead of letting
//! a generic error propagate. No retry loop lives here: re-asking a
//! non-compliant model with the same prompt is a deterministic failure.

use crate::config::Settings;
use crate::models::{
    ChatMessage, CompletionRequest, CompletionResponse, ReviewResult, Suggestion,
    UpstreamErrorResponse,
};
use crate::services::{extract_json, normalize_suggestions, validate_review_response};
use crate::utils::error::{AppError, AppResult};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

const REVIEW_SYSTEM_PROMPT: &str = r#"You are an expert code reviewer with deep expertise in software engineering best practices.

Analyze the provided code focusing on these areas:
- **Security**: Identify vulnerabilities, injection risks, authentication/authorization issues
- **Performance**: Spot inefficiencies, unnecessary operations, optimization opportunities
- **Readability**: Assess code clarity, naming conventions, documentation quality
- **Maintainability**: Evaluate structure, modularity, and ease of future changes
- **Best Practices**: Check adherence to language-specific conventions and patterns

Provide your analysis in the following format:

1. **Overall Review** (2-3 sentences): Brief summary of code quality and main observations

2. **Suggestions** (3-5 items): Specific, actionable improvements with:
   - Clear description of what to improve
   - Severity level: "critical", "high", "medium", or "low"
   - Focus area: "security", "performance", "readability", or "maintainability"

3. **Quality Score** (1-10): Overall code quality rating where:
   - 1-3: Poor quality, requires significant refactoring
   - 4-6: Acceptable but needs improvement
   - 7-8: Good quality with minor issues
   - 9-10: Excellent, production-ready code

IMPORTANT: You MUST respond with ONLY a valid JSON object (no markdown, no extra text).
Format your response as JSON:
{
  "review": "overall review text",
  "suggestions": [
    {
      "text": "suggestion description",
      "severity": "critical|high|medium|low",
      "category": "security|performance|readability|maintainability"
    }
  ],
  "score": integer
}"#;

const SUGGEST_SYSTEM_PROMPT: &str = r#"You are a code improvement expert. Provide 5 specific, actionable suggestions to improve the code.
You MUST respond with ONLY a valid JSON object (no markdown, no extra text) with this exact structure:
{
  "suggestions": [
    {
      "text": "Detailed suggestion text",
      "severity": "critical|high|medium|low",
      "category": "security|performance|readability|maintainability"
    }
  ]
}"#;

/// Gateway to the upstream chat-completion endpoint
#[derive(Debug, Clone)]
pub struct LlmGateway {
    client: Client,
    settings: Settings,
}

impl LlmGateway {
    /// Create a new gateway instance
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.llm.timeout))
            .user_agent(concat!("codereview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, settings })
    }

    /// Get an AI-powered review of the given code
    pub async fn review_code(
        &self,
        code: &str,
        language: &str,
        context: Option<&str>,
    ) -> AppResult<ReviewResult> {
        if self.settings.is_mock_mode() {
            return Ok(mock_review());
        }

        let user_prompt = build_review_prompt(code, language, context);
        let content = self
            .complete(
                REVIEW_SYSTEM_PROMPT,
                user_prompt,
                self.settings.llm.review_max_tokens,
            )
            .await?;

        let value = extract_json(&content)?;
        validate_review_response(value)
    }

    /// Get specific improvement suggestions for the given code
    pub async fn suggest_improvements(
        &self,
        code: &str,
        language: &str,
    ) -> AppResult<Vec<Suggestion>> {
        if self.settings.is_mock_mode() {
            return Ok(mock_suggestions());
        }

        let user_prompt = format!(
            "Suggest improvements for this {} code:\n\n{}\n\nRespond with JSON only.",
            language, code
        );
        let content = self
            .complete(
                SUGGEST_SYSTEM_PROMPT,
                user_prompt,
                self.settings.llm.suggest_max_tokens,
            )
            .await?;

        let value = extract_json(&content)?;
        normalize_suggestions(&value)
    }

    /// Issue one completion call and return the winning choice's content
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: String,
        max_tokens: u32,
    ) -> AppResult<String> {
        let llm = &self.settings.llm;

        let request = CompletionRequest::new(
            llm.deployment.clone(),
            vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            max_tokens,
            llm.token_param,
            llm.temperature,
        );

        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            llm.endpoint.trim_end_matches('/'),
            llm.deployment,
            llm.api_version
        );

        debug!("Sending completion request to deployment {}", llm.deployment);

        let api_key = llm.api_key.as_deref().unwrap_or_default();
        let response = self
            .client
            .post(&url)
            .header("api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Upstream request failed to send: {}", e);
                AppError::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.classify_upstream_failure(status, response).await);
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            AppError::UpstreamFormat(format!("failed to parse completion response: {}", e))
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::UpstreamFormat("no choices returned".to_string()))?;

        match choice.message.content {
            Some(content) if !content.is_empty() => {
                debug!("Completion returned {} chars", content.len());
                Ok(content)
            }
            _ => Err(AppError::UpstreamFormat(format!(
                "empty completion content (finish_reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }

    /// Map a non-success upstream response to a typed error
    async fn classify_upstream_failure(
        &self,
        status: StatusCode,
        response: reqwest::Response,
    ) -> AppError {
        let body = response.text().await.unwrap_or_default();

        // 403 is not treated as a credential problem; providers use it for
        // quota and content-policy refusals, which surface as API errors
        match status.as_u16() {
            401 => AppError::Authentication,
            429 => AppError::RateLimit,
            _ => {
                // Prefer the structured upstream message when present
                let message = serde_json::from_str::<UpstreamErrorResponse>(&body)
                    .map(|e| {
                        let kind = e.error.error_type.or(e.error.code).unwrap_or_default();
                        if kind.is_empty() {
                            e.error.message
                        } else {
                            format!("{}: {}", kind, e.error.message)
                        }
                    })
                    .unwrap_or_else(|_| format!("upstream returned status {}", status));
                warn!("Upstream API error ({}): {}", status, message);
                AppError::UpstreamApi(message)
            }
        }
    }
}

fn build_review_prompt(code: &str, language: &str, context: Option<&str>) -> String {
    let context_line = context
        .map(|c| format!("Context: {}\n\n", c))
        .unwrap_or_default();
    format!(
        "Review this {lang} code:\n\n```{lang}\n{code}\n```\n\n{context}Respond with JSON only.",
        lang = language,
        code = code,
        context = context_line
    )
}

/// Canned review used when no API key is configured
fn mock_review() -> ReviewResult {
    ReviewResult {
        review: "Mock review: Code looks good! (API not configured)".to_string(),
        suggestions: vec![
            Suggestion {
                text: "Add more comments to explain complex logic".to_string(),
                severity: "low".to_string(),
                category: "readability".to_string(),
            },
            Suggestion {
                text: "Consider adding error handling for edge cases".to_string(),
                severity: "medium".to_string(),
                category: "maintainability".to_string(),
            },
        ],
        score: 7,
    }
}

/// Canned suggestions used when no API key is configured
fn mock_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            text: "Consider adding type hints".to_string(),
            severity: "medium".to_string(),
            category: "readability".to_string(),
        },
        Suggestion {
            text: "Add docstrings to functions".to_string(),
            severity: "medium".to_string(),
            category: "maintainability".to_string(),
        },
        Suggestion {
            text: "Use more descriptive variable names".to_string(),
            severity: "low".to_string(),
            category: "readability".to_string(),
        },
    ]
}
