//! Outbound request rate limiting.
//!
//! A single limiter is shared by every request of a [`Fetcher`](super::Fetcher),
//! regardless of host.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::Sleeper;

/// Enforces a minimum interval between consecutive outbound requests.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Derive the interval from a requests-per-minute budget. `0` disables limiting.
    pub fn per_minute(requests_per_minute: u32) -> Self {
        if requests_per_minute == 0 {
            return Self::new(Duration::ZERO);
        }
        Self::new(Duration::from_secs(60) / requests_per_minute)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until the interval since the previous request has elapsed,
    /// then record the current request.
    pub fn acquire(&self, sleeper: &dyn Sleeper) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleeper.sleep(self.min_interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}
