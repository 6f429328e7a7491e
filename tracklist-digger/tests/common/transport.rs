//! Scripted transport and sleeper used in place of the network.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracklist_digger::fetch::{FetchResponse, HttpTransport, Sleeper, TransportError};

/// Serves registered pages; fixed statuses override them; anything else is
/// a 404. Every requested URL is logged in order.
#[derive(Default)]
pub struct ScriptedTransport {
    pages: Mutex<HashMap<String, String>>,
    statuses: Mutex<HashMap<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, url: &str, body: impl Into<String>) -> &Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
        self
    }

    pub fn status(&self, url: &str, status: u16) -> &Self {
        self.statuses
            .lock()
            .unwrap()
            .insert(url.to_string(), status);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(status) = self.statuses.lock().unwrap().get(url) {
            return Ok(FetchResponse::new(url, *status, ""));
        }
        match self.pages.lock().unwrap().get(url) {
            Some(body) => Ok(FetchResponse::new(url, 200, body.clone())),
            None => Ok(FetchResponse::new(url, 404, "")),
        }
    }
}

/// Never blocks.
pub struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}
