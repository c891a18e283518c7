//! Review API data models
//!
//! Request and response structures exchanged between clients and the
//! review endpoints

use serde::{Deserialize, Serialize};

/// Minimum accepted code length in characters
pub const MIN_CODE_LENGTH: usize = 10;

/// Maximum accepted code length in characters
pub const MAX_CODE_LENGTH: usize = 10_000;

/// Request body for `/review` and `/suggest`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Code to review
    pub code: String,
    /// Programming language of the snippet
    #[serde(default = "default_language")]
    pub language: String,
    /// Optional free-form context about the code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn default_language() -> String {
    "python".to_string()
}

impl ReviewRequest {
    /// Validate the request payload
    pub fn validate(&self) -> Result<(), String> {
        let len = self.code.chars().count();
        if len < MIN_CODE_LENGTH {
            return Err(format!(
                "code must be at least {} characters long",
                MIN_CODE_LENGTH
            ));
        }
        if len > MAX_CODE_LENGTH {
            return Err(format!(
                "code cannot exceed {} characters",
                MAX_CODE_LENGTH
            ));
        }
        if self.language.is_empty() {
            return Err("language cannot be empty".to_string());
        }
        Ok(())
    }
}

/// One improvement recommendation
///
/// Severity and category are open string labels (observed severities:
/// critical/high/medium/low), deliberately not restricted to an enum.
/// All fields default so that partially-populated upstream entries
/// survive deserialization; sub-fields are not deep-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Description of the improvement
    #[serde(default)]
    pub text: String,
    /// Severity label (e.g. critical/high/medium/low)
    #[serde(default)]
    pub severity: String,
    /// Focus area (e.g. security/performance/readability/maintainability)
    #[serde(default)]
    pub category: String,
}

/// Outcome of a review request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    /// Overall free-text assessment
    pub review: String,
    /// Suggestions in the order the model produced them
    pub suggestions: Vec<Suggestion>,
    /// Quality score, clamped to 1..=10
    pub score: u8,
}

/// Response body for `/suggest`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Response body for `/complexity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityReport {
    /// Total line count
    pub lines: usize,
    /// Function/method definitions found
    pub functions: usize,
    /// Deepest indentation level
    pub max_nesting_depth: usize,
    /// 1-10, lower is better
    pub complexity_score: u8,
    /// Human-readable summary of the score
    pub analysis: String,
}

/// Error body shape used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
