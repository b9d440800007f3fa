//! Retry policies for requests against the Bundlr node.
//!
//! Only read-only lookups (balance, price, node info) retry. The two
//! mutating calls (registering a funding transfer, submitting a data item)
//! always use [`RetryPolicy::None`] so a flaky network can never double-pay
//! or double-post.

use std::time::Duration;

/// Retry policy for a single request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries. Used for every mutating POST.
    #[default]
    None,
    /// Retry on transport failures + 429/502/503/504. Used for GETs.
    Idempotent,
}

/// Backoff configuration for the idempotent policy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retry attempts beyond the initial request.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Ceiling on the delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied after each retry.
    pub backoff_factor: f64,
    /// Whether to add +/-25% jitter to each delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Delay for a given 0-indexed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}
