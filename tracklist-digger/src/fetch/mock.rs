//! Test doubles for the fetch layer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{Fetcher, FetchErrorKind, FetchResponse, HttpTransport, Sleeper, TransportError};
use crate::config::FetchSettings;

/// A fetcher over `transport` that never blocks: no rate limit, no jitter,
/// and retry sleeps are recorded instead of slept.
pub fn instant_fetcher(transport: Arc<MockTransport>) -> Arc<Fetcher> {
    let settings = FetchSettings {
        rate_limit_rpm: 0,
        max_jitter_ms: 0,
        cache_sweep_probability: 0.0,
        ..Default::default()
    };
    Arc::new(
        Fetcher::with_transport(Box::new(transport), &settings)
            .with_sleeper(Arc::new(RecordingSleeper::new())),
    )
}

/// Scripted transport. One-shot outcomes queued with `push_*` are served
/// first, then the page registered with `add_page`; anything else is a 404.
pub struct MockTransport {
    pages: Mutex<HashMap<String, String>>,
    scripted: Mutex<HashMap<String, VecDeque<Result<u16, FetchErrorKind>>>>,
    call_counts: Mutex<HashMap<String, usize>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            scripted: Mutex::new(HashMap::new()),
            call_counts: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_page(&self, url: &str, body: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
    }

    pub fn push_status(&self, url: &str, status: u16) {
        self.scripted
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(Ok(status));
    }

    pub fn push_error(&self, url: &str, kind: FetchErrorKind) {
        self.scripted
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(Err(kind));
    }

    pub fn get_call_count(&self, url: &str) -> usize {
        *self.call_counts.lock().unwrap().get(url).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());

        match scripted {
            Some(Ok(status)) => Ok(FetchResponse::new(url, status, "")),
            Some(Err(kind)) => Err(TransportError::new(kind, "scripted failure")),
            None => match self.pages.lock().unwrap().get(url) {
                Some(body) => Ok(FetchResponse::new(url, 200, body.clone())),
                None => Ok(FetchResponse::new(url, 404, "")),
            },
        }
    }
}

/// Records requested sleeps instead of blocking.
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self {
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
