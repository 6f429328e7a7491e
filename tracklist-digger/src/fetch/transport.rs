//! Blocking HTTP transport used by the [`Fetcher`](super::Fetcher).

use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;

use super::{FetchErrorKind, FetchResponse, TransportError};

/// Performs a single GET request. Retry, caching and rate limiting are the
/// fetcher's job, not the transport's.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        (**self).get(url)
    }
}

/// [`HttpTransport`] backed by `reqwest`'s blocking client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

fn classify(err: &reqwest::Error) -> FetchErrorKind {
    if err.is_timeout() {
        FetchErrorKind::Timeout
    } else if err.is_connect() || err.is_request() || err.is_body() {
        FetchErrorKind::Connection
    } else if let Some(status) = err.status() {
        FetchErrorKind::from_status(status.as_u16())
    } else {
        FetchErrorKind::Unknown
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::new(classify(&e), e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::new(classify(&e), e.to_string()))?;

        Ok(FetchResponse::new(url, status, body))
    }
}
