//! Upstream chat-completion wire format
//!
//! Request and response structures for the hosted LLM endpoint. Only the
//! fields this service actually reads are modeled; unknown response fields
//! are ignored.

use serde::{Deserialize, Serialize};

/// Name under which the completion-length limit is sent upstream
///
/// Newer model generations reject `max_tokens` and require
/// `max_completion_tokens`; older ones do the opposite. Sending the wrong
/// name is a hard upstream error, so the name is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenParam {
    MaxCompletionTokens,
    MaxTokens,
}

impl std::str::FromStr for TokenParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max_completion_tokens" => Ok(TokenParam::MaxCompletionTokens),
            "max_tokens" => Ok(TokenParam::MaxTokens),
            other => Err(format!("unknown token parameter name: {}", other)),
        }
    }
}

/// Chat message sent upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request
///
/// No `response_format` field: structured-output parameters are not assumed
/// to be supported by the configured model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model or deployment name
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Completion length under the legacy name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Completion length under the current name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    /// Sampling temperature; omitted unless the model accepts a constant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Build a request with the completion-length limit under the
    /// configured parameter name
    pub fn new(
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
        limit: u32,
        token_param: TokenParam,
        temperature: Option<f32>,
    ) -> Self {
        let (max_tokens, max_completion_tokens) = match token_param {
            TokenParam::MaxTokens => (Some(limit), None),
            TokenParam::MaxCompletionTokens => (None, Some(limit)),
        };
        Self {
            model: model.into(),
            messages,
            max_tokens,
            max_completion_tokens,
            temperature,
        }
    }
}

/// Chat-completion response
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Choice list; may be empty on upstream misbehavior
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// Assistant message
    pub message: AssistantMessage,
    /// Why generation stopped (diagnostics only)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message within a choice
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    /// Generated text; may be null when generation was cut off
    #[serde(default)]
    pub content: Option<String>,
}

/// Upstream error response body
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorResponse {
    pub error: UpstreamError,
}

/// Upstream error details
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_param_selects_field() {
        let req = CompletionRequest::new(
            "gpt-5-nano",
            vec![ChatMessage::user("hi")],
            2000,
            TokenParam::MaxCompletionTokens,
            None,
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["max_completion_tokens"], 2000);
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());

        let req = CompletionRequest::new(
            "gpt-4o",
            vec![ChatMessage::user("hi")],
            1000,
            TokenParam::MaxTokens,
            Some(1.0),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["max_tokens"], 1000);
        assert!(json.get("max_completion_tokens").is_none());
        assert_eq!(json["temperature"], 1.0);
    }

    #[test]
    fn test_token_param_from_str() {
        assert_eq!(
            "max_completion_tokens".parse::<TokenParam>().unwrap(),
            TokenParam::MaxCompletionTokens
        );
        assert_eq!(
            "max_tokens".parse::<TokenParam>().unwrap(),
            TokenParam::MaxTokens
        );
        assert!("n_tokens".parse::<TokenParam>().is_err());
    }

    #[test]
    fn test_response_tolerates_null_content() {
        let json = r#"{
            "id": "cmpl-1",
            "choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "length"}]
        }"#;
        let resp: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(resp.choices[0].message.content.is_none());
        assert_eq!(resp.choices[0].finish_reason.as_deref(), Some("length"));
    }
}
