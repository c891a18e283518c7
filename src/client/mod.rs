//! Resilient API client
//!
//! Library-side facade for the review backend: a protocol-agnostic retrying
//! transport, a per-operation error classifier, and session state for
//! accumulating suggestions. Any Rust front-end, CLI, or test harness talks
//! to the backend through this module.

pub mod api;
pub mod backoff;
pub mod classify;
pub mod transport;

pub use api::{ApiClient, ReviewSession};
pub use backoff::RetryPolicy;
pub use classify::{ClientError, ErrorKind, Operation};
pub use transport::{ClientConfig, ResilientClient};
