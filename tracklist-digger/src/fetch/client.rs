//! The fetch layer's entry point.
//!
//! Every outbound GET goes through [`Fetcher::fetch`], which consults the
//! response cache, waits on the rate limiter and retries transient
//! failures with exponential backoff. All waiting blocks the calling thread.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::cache::ResponseCache;
use super::rate_limit::RateLimiter;
use super::retry_policy::RetryPolicy;
use super::transport::{HttpTransport, ReqwestTransport};
use super::{FetchError, FetchErrorKind, FetchResponse};
use crate::config::FetchSettings;
use crate::error::DiggerError;

/// Blocks the current thread. Swapped out in tests to observe delays.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Rate-limited, caching, retrying HTTP GET client.
///
/// The cache and limiter are owned by the fetcher, so one instance should be
/// shared (via `Arc`) by every component of a run.
pub struct Fetcher {
    transport: Box<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
    retry_policy: RetryPolicy,
    rate_limiter: RateLimiter,
    cache: ResponseCache,
}

impl Fetcher {
    /// Build a fetcher talking to the network through `reqwest`.
    pub fn new(settings: &FetchSettings) -> Result<Self, DiggerError> {
        let transport = ReqwestTransport::new(
            &settings.user_agent,
            Duration::from_secs(settings.request_timeout_secs),
        )
        .map_err(|e| DiggerError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_transport(Box::new(transport), settings))
    }

    pub fn with_transport(transport: Box<dyn HttpTransport>, settings: &FetchSettings) -> Self {
        Self {
            transport,
            sleeper: Arc::new(ThreadSleeper),
            retry_policy: RetryPolicy::new(settings),
            rate_limiter: RateLimiter::per_minute(settings.rate_limit_rpm),
            cache: ResponseCache::new(
                Duration::from_secs(settings.cache_expiry_secs),
                settings.cache_sweep_probability,
            ),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// GET `url`, returning the successful response or the last failure
    /// once the retry policy gives up.
    pub fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.cache.maybe_sweep();

        if let Some(cached) = self.cache.get(url) {
            debug!("Fetch cache hit for {}", url);
            return Ok(cached);
        }

        let mut attempt = 0;
        loop {
            self.rate_limiter.acquire(self.sleeper.as_ref());

            let error = match self.transport.get(url) {
                Ok(response) if response.is_success() => {
                    self.cache.insert(url, response.clone());
                    return Ok(response);
                }
                Ok(response) => FetchError::new(
                    FetchErrorKind::from_status(response.status),
                    url,
                    format!("HTTP {}", response.status),
                )
                .with_status(response.status),
                Err(e) => FetchError::new(e.kind, url, e.message),
            };

            if !self.retry_policy.should_retry(error.kind, attempt) {
                if error.is_retryable() {
                    warn!(
                        "Giving up on {} after {} attempts: {}",
                        url,
                        attempt + 1,
                        error.message
                    );
                }
                return Err(error);
            }

            let delay = self.retry_policy.delay_for(attempt);
            warn!(
                "Attempt {} for {} failed ({}), retrying in {:.2}s",
                attempt + 1,
                url,
                error,
                delay.as_secs_f64()
            );
            self.sleeper.sleep(delay);
            attempt += 1;
        }
    }
}
