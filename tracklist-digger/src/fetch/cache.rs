//! In-memory response cache keyed by exact URL.
//!
//! Not an LRU: entries live until they are older than the expiry window and
//! a sweep happens to run. Sweeps are sampled on a small fraction of calls.

use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

use super::FetchResponse;

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    response: FetchResponse,
}

pub struct ResponseCache {
    expiry: Duration,
    sweep_probability: f64,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// An expiry of zero disables caching: every entry is already stale.
    pub fn new(expiry: Duration, sweep_probability: f64) -> Self {
        Self {
            expiry,
            sweep_probability: sweep_probability.clamp(0.0, 1.0),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached response for `url` if it is younger than the expiry.
    pub fn get(&self, url: &str) -> Option<FetchResponse> {
        let entries = self.lock();
        entries
            .get(url)
            .filter(|entry| entry.fetched_at.elapsed() < self.expiry)
            .map(|entry| entry.response.clone())
    }

    pub fn insert(&self, url: &str, response: FetchResponse) {
        if self.expiry.is_zero() {
            return;
        }
        self.lock().insert(
            url.to_string(),
            CacheEntry {
                fetched_at: Instant::now(),
                response,
            },
        );
    }

    /// Evict expired entries. Returns the number of evicted entries.
    pub fn sweep_expired(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.expiry);
        before - entries.len()
    }

    /// Run [`sweep_expired`](Self::sweep_expired) with the configured probability.
    pub fn maybe_sweep(&self) {
        if self.sweep_probability > 0.0 && rand::rng().random_bool(self.sweep_probability) {
            let evicted = self.sweep_expired();
            if evicted > 0 {
                debug!("Evicted {} expired responses from fetch cache", evicted);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
