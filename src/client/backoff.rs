//! Retry backoff policy
//!
//! Pure delay/decision computation for the resilient transport. Performs no
//! I/O; the transport owns the actual suspension.

use reqwest::StatusCode;
use std::time::Duration;

/// Default maximum retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay in milliseconds
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Exponential backoff retry policy
///
/// The delay before the i-th retry (0-indexed) is `base_delay * 2^i`,
/// yielding 1000/2000/4000 ms with the defaults. Callers may depend on
/// these exact timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retry attempts after the initial request
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before retry number `attempt` (0-indexed)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let millis = self.base_delay.as_millis() as u64;
        Duration::from_millis(millis.saturating_mul(2u64.saturating_pow(attempt)))
    }

    /// Whether another retry may be scheduled after `attempt` retries
    /// have already been consumed
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Whether an HTTP status is worth retrying at all
    ///
    /// Only 5xx responses are transient; 4xx signals a client-input or
    /// auth problem that will not self-resolve, and anything below 400
    /// is a success.
    pub fn is_retryable_status(status: StatusCode) -> bool {
        status.is_server_error()
    }
}
