//! Review response validation and normalization
//!
//! Turns a parsed-but-untrusted JSON value into a canonical [`ReviewResult`]
//! or a typed failure. A partially-populated result is never returned.

use crate::models::{ReviewResult, Suggestion};
use crate::utils::error::{AppError, AppResult};
use serde_json::Value;

const REQUIRED_KEYS: [&str; 3] = ["review", "suggestions", "score"];

/// Default score when the model omits one
const DEFAULT_SCORE: i64 = 5;

/// Validate and normalize a code review response
///
/// Suggestion elements are only shallowly validated: missing sub-fields
/// default to empty strings and wrong-shaped entries are carried through
/// as best as the typed model allows, matching the upstream contract's
/// deliberately loose suggestion schema.
pub fn validate_review_response(value: Value) -> AppResult<ReviewResult> {
    let obj = value.as_object().ok_or_else(|| {
        AppError::UpstreamFormat(format!("expected a JSON object, got: {}", value))
    })?;

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .filter(|key| !obj.contains_key(**key))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(AppError::UpstreamFormat(format!(
            "response missing required keys: {}",
            missing.join(", ")
        )));
    }

    let review = coerce_string(&obj["review"]);

    let suggestions = match &obj["suggestions"] {
        Value::Array(items) => items.iter().map(shallow_suggestion).collect(),
        // falsy values (null, false, "", 0, {}) coerce to an empty list
        value if is_falsy(value) => Vec::new(),
        other => {
            return Err(AppError::UpstreamFormat(format!(
                "expected suggestions to be a list, got: {}",
                other
            )))
        }
    };

    let score = coerce_score(&obj["score"]).clamp(1, 10) as u8;

    Ok(ReviewResult {
        review,
        suggestions,
        score,
    })
}

/// Normalize the suggestion list of a `/suggest` response
///
/// Unlike the review path, elements here are actively structured: object
/// fields are string-coerced with defaults, and bare strings become full
/// suggestions.
pub fn normalize_suggestions(value: &Value) -> AppResult<Vec<Suggestion>> {
    let items = match value.get("suggestions") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(AppError::UpstreamFormat(format!(
                "expected suggestions to be a list, got: {}",
                other
            )))
        }
    };

    Ok(items
        .iter()
        .map(|item| match item {
            Value::Object(map) => Suggestion {
                text: map
                    .get("text")
                    .map(coerce_string)
                    .unwrap_or_else(|| item.to_string()),
                severity: map
                    .get("severity")
                    .map(coerce_string)
                    .unwrap_or_else(|| "medium".to_string()),
                category: map
                    .get("category")
                    .map(coerce_string)
                    .unwrap_or_else(|| "maintainability".to_string()),
            },
            // Legacy bare-string format
            other => Suggestion {
                text: coerce_string(other),
                severity: "medium".to_string(),
                category: "maintainability".to_string(),
            },
        })
        .collect())
}

/// Whether a JSON value is falsy in the dynamic-language sense
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Coerce any JSON value to a string; strings pass through unquoted
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a JSON value to an integer score, defaulting when absent/falsy
fn coerce_score(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(DEFAULT_SCORE),
        Value::String(s) => s.trim().parse().unwrap_or(DEFAULT_SCORE),
        _ => DEFAULT_SCORE,
    }
}

/// Shallow per-element conversion for the review path
fn shallow_suggestion(value: &Value) -> Suggestion {
    serde_json::from_value(value.clone()).unwrap_or_else(|_| Suggestion {
        text: coerce_string(value),
        severity: String::new(),
        category: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_response() {
        let result = validate_review_response(json!({
            "review": "Solid code overall.",
            "suggestions": [
                {"text": "add tests", "severity": "medium", "category": "maintainability"},
                {"text": "rename x", "severity": "low", "category": "readability"}
            ],
            "score": 8
        }))
        .unwrap();

        assert_eq!(result.review, "Solid code overall.");
        assert_eq!(result.score, 8);
        assert_eq!(result.suggestions.len(), 2);
        // Order is the model's order
        assert_eq!(result.suggestions[0].text, "add tests");
        assert_eq!(result.suggestions[1].text, "rename x");
    }

    #[test]
    fn test_score_clamped_high() {
        let result = validate_review_response(json!({
            "review": "ok", "suggestions": [], "score": 11
        }))
        .unwrap();
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_score_clamped_low() {
        let result = validate_review_response(json!({
            "review": "ok", "suggestions": [], "score": 0
        }))
        .unwrap();
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_score_defaults_when_absent() {
        let result = validate_review_response(json!({
            "review": "ok", "suggestions": [], "score": null
        }))
        .unwrap();
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_score_string_coercion() {
        let result = validate_review_response(json!({
            "review": "ok", "suggestions": [], "score": "9"
        }))
        .unwrap();
        assert_eq!(result.score, 9);
    }

    #[test]
    fn test_missing_keys_named() {
        let err = validate_review_response(json!({"review": "ok"})).unwrap_err();
        let detail = err.internal_detail().unwrap();
        assert!(detail.contains("suggestions"));
        assert!(detail.contains("score"));
        assert!(!detail.contains("review,"));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(validate_review_response(json!([1, 2, 3])).is_err());
        assert!(validate_review_response(json!(7)).is_err());
    }

    #[test]
    fn test_null_suggestions_become_empty() {
        let result = validate_review_response(json!({
            "review": "ok", "suggestions": null, "score": 6
        }))
        .unwrap();
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_falsy_suggestions_become_empty() {
        for falsy in [json!(false), json!(""), json!(0), json!({})] {
            let result = validate_review_response(json!({
                "review": "ok", "suggestions": falsy, "score": 6
            }))
            .unwrap();
            assert!(result.suggestions.is_empty());
        }

        // truthy non-lists are still rejected
        for truthy in [json!(true), json!("some"), json!(3), json!({"a": 1})] {
            assert!(validate_review_response(json!({
                "review": "ok", "suggestions": truthy, "score": 6
            }))
            .is_err());
        }
    }

    #[test]
    fn test_shallow_suggestion_passthrough() {
        // Missing sub-fields are defaulted, not rejected
        let result = validate_review_response(json!({
            "review": "ok",
            "suggestions": [{"text": "only text"}],
            "score": 6
        }))
        .unwrap();
        assert_eq!(result.suggestions[0].text, "only text");
        assert_eq!(result.suggestions[0].severity, "");
    }

    #[test]
    fn test_review_coerced_to_string() {
        let result = validate_review_response(json!({
            "review": 42, "suggestions": [], "score": 6
        }))
        .unwrap();
        assert_eq!(result.review, "42");
    }

    #[test]
    fn test_normalize_suggestions_defaults() {
        let suggestions = normalize_suggestions(&json!({
            "suggestions": [
                {"text": "use type hints"},
                "add docstrings"
            ]
        }))
        .unwrap();

        assert_eq!(suggestions[0].text, "use type hints");
        assert_eq!(suggestions[0].severity, "medium");
        assert_eq!(suggestions[0].category, "maintainability");
        assert_eq!(suggestions[1].text, "add docstrings");
        assert_eq!(suggestions[1].severity, "medium");
    }

    #[test]
    fn test_normalize_suggestions_missing_key() {
        assert!(normalize_suggestions(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_suggestions_wrong_shape() {
        assert!(normalize_suggestions(&json!({"suggestions": "nope"})).is_err());
    }
}
