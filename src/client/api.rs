//! API client facade
//!
//! Typed operations against the review backend, composed from the resilient
//! transport and the response classifier. This layer adds no backoff of its
//! own; all retrying happens in the transport.

use crate::client::classify::{classify_response, ClientError, Operation};
use crate::client::transport::{ClientConfig, ResilientClient};
use crate::models::{ReviewResult, Suggestion, SuggestionsResponse};
use serde_json::json;

/// Client for the review backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: ResilientClient,
}

impl ApiClient {
    /// Create a client from explicit configuration
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let transport = ResilientClient::new(config.retry.clone(), config.timeout)?;
        Ok(Self { config, transport })
    }

    /// Request a full review of the given code
    pub async fn request_review(
        &self,
        code: &str,
        language: &str,
    ) -> Result<ReviewResult, ClientError> {
        let response = self.post("/review", code, language).await?;
        if !response.status().is_success() {
            return Err(classify_response(Operation::Review, response).await);
        }
        response
            .json::<ReviewResult>()
            .await
            .map_err(|e| ClientError::unexpected_response(e.to_string()))
    }

    /// Request additional suggestions for the given code
    ///
    /// Unwraps the response one level: callers receive the `suggestions`
    /// array itself.
    pub async fn request_suggestions(
        &self,
        code: &str,
        language: &str,
    ) -> Result<Vec<Suggestion>, ClientError> {
        let response = self.post("/suggest", code, language).await?;
        if !response.status().is_success() {
            return Err(classify_response(Operation::Suggest, response).await);
        }
        response
            .json::<SuggestionsResponse>()
            .await
            .map(|body| body.suggestions)
            .map_err(|e| ClientError::unexpected_response(e.to_string()))
    }

    async fn post(
        &self,
        path: &str,
        code: &str,
        language: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.config.api_base.trim_end_matches('/'), path);
        let body = json!({ "code": code, "language": language });
        let request = self
            .transport
            .http()
            .post(&url)
            .json(&body)
            .build()
            .map_err(|e| ClientError::internal(e.to_string()))?;
        self.transport.execute(request).await
    }
}

/// Client-side result state for one review workflow
///
/// Holds a single current-result slot with last-writer-wins semantics and
/// an append-only suggestions accumulator. Appends preserve call order and
/// never deduplicate.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    current: Option<ReviewResult>,
    suggestions: Vec<Suggestion>,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly-obtained review result, replacing any prior one
    ///
    /// The accumulated suggestions restart from the result's own list.
    pub fn apply_review(&mut self, result: ReviewResult) {
        self.suggestions = result.suggestions.clone();
        self.current = Some(result);
    }

    /// Append supplementary suggestions in call order
    pub fn append_suggestions(&mut self, more: Vec<Suggestion>) {
        self.suggestions.extend(more);
    }

    pub fn current(&self) -> Option<&ReviewResult> {
        self.current.as_ref()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(text: &str) -> Suggestion {
        Suggestion {
            text: text.to_string(),
            severity: "medium".to_string(),
            category: "maintainability".to_string(),
        }
    }

    fn result_with(suggestions: Vec<Suggestion>) -> ReviewResult {
        ReviewResult {
            review: "ok".to_string(),
            suggestions,
            score: 7,
        }
    }

    #[test]
    fn test_accumulation_preserves_order_without_dedup() {
        let mut session = ReviewSession::new();
        session.apply_review(result_with(vec![suggestion("a")]));
        session.append_suggestions(vec![suggestion("b"), suggestion("c")]);
        session.append_suggestions(vec![suggestion("b"), suggestion("d")]);

        let texts: Vec<&str> = session.suggestions().iter().map(|s| s.text.as_str()).collect();
        // 1 + 2 + 2 entries, call order, duplicate "b" kept
        assert_eq!(texts, vec!["a", "b", "c", "b", "d"]);
    }

    #[test]
    fn test_new_review_resets_accumulator() {
        let mut session = ReviewSession::new();
        session.apply_review(result_with(vec![suggestion("a")]));
        session.append_suggestions(vec![suggestion("b")]);

        session.apply_review(result_with(vec![suggestion("z")]));
        assert_eq!(session.suggestions().len(), 1);
        assert_eq!(session.suggestions()[0].text, "z");
        assert_eq!(session.current().unwrap().suggestions[0].text, "z");
    }

    #[test]
    fn test_last_writer_wins() {
        let mut session = ReviewSession::new();
        let mut first = result_with(vec![]);
        first.score = 3;
        let mut second = result_with(vec![]);
        second.score = 9;

        session.apply_review(first);
        session.apply_review(second);
        assert_eq!(session.current().unwrap().score, 9);
    }

    #[test]
    fn test_client_creation() {
        assert!(ApiClient::new(ClientConfig::default()).is_ok());
    }
}
