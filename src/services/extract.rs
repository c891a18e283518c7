//! Tolerant JSON extraction from LLM output
//!
//! The model is instructed to emit JSON only, but compliance is not
//! guaranteed: output may be wrapped in markdown fences or surrounded by
//! prose. Extraction is an ordered list of strategies; the first success
//! short-circuits. Already-valid JSON always passes through unaltered.

use crate::utils::error::{AppError, AppResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// How much of the offending text is kept for diagnostics
const DIAGNOSTIC_PREFIX_CHARS: usize = 200;

/// Fenced code block, optionally tagged `json`, containing a brace object
static FENCED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced-object pattern is valid")
});

/// First brace-delimited object with at most one level of nested braces
static BRACE_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").expect("brace-object pattern is valid")
});

/// Extract a JSON value from free-form model output
pub fn extract_json(text: &str) -> AppResult<Value> {
    // Direct parse first
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    // JSON inside a markdown code block
    if let Some(captures) = FENCED_OBJECT.captures(text) {
        if let Ok(value) = serde_json::from_str(&captures[1]) {
            return Ok(value);
        }
    }

    // Raw JSON object embedded in prose
    if let Some(found) = BRACE_OBJECT.find(text) {
        if let Ok(value) = serde_json::from_str(found.as_str()) {
            return Ok(value);
        }
    }

    Err(AppError::UpstreamFormat(format!(
        "could not extract JSON from model output: {}...",
        truncate_chars(text, DIAGNOSTIC_PREFIX_CHARS)
    )))
}

/// Truncate to a character budget without splitting a code point
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
