//! Retry policy for failed fetches.
//!
//! Implements exponential backoff with a cap and random jitter.

use rand::Rng;
use std::time::Duration;

use crate::config::FetchSettings;
use crate::fetch::FetchErrorKind;

/// Retry policy implementing exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per fetch, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each further attempt.
    pub base_delay: Duration,
    /// Cap for exponential growth (jitter is added on top).
    pub max_delay: Duration,
    /// Upper bound (exclusive) of the random jitter added to every delay.
    pub max_jitter: Duration,
}

impl RetryPolicy {
    /// Create a new RetryPolicy from configuration settings.
    pub fn new(settings: &FetchSettings) -> Self {
        Self {
            max_attempts: settings.max_retries.max(1),
            base_delay: Duration::from_secs(settings.retry_delay_secs),
            max_delay: Duration::from_secs(settings.max_backoff_secs),
            max_jitter: Duration::from_millis(settings.max_jitter_ms),
        }
    }

    /// Check if a failure on the given zero-based attempt should be retried.
    pub fn should_retry(&self, kind: FetchErrorKind, attempt: u32) -> bool {
        kind.is_retryable() && attempt + 1 < self.max_attempts
    }

    /// Backoff without jitter: `base_delay * 2^attempt`, capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Backoff plus a random jitter in `[0, max_jitter)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.backoff(attempt);
        if self.max_jitter.is_zero() {
            return backoff;
        }
        let jitter = rand::rng().random::<f64>() * self.max_jitter.as_secs_f64();
        backoff + Duration::from_secs_f64(jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            max_jitter: Duration::from_secs(1),
        }
    }
}
