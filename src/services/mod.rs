//! Services module
//!
//! Upstream LLM gateway, the response extraction/validation layers, and
//! local complexity analysis

pub mod complexity;
pub mod extract;
pub mod gateway;
pub mod validate;

pub use extract::extract_json;
pub use gateway::LlmGateway;
pub use validate::{normalize_suggestions, validate_review_response};
