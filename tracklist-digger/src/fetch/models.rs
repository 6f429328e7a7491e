//! Response and error types for the fetch layer.

use std::fmt;
use thiserror::Error;

/// Classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Timeout,     // Request timed out - retry
    Connection,  // Network error - retry
    ServerError, // 5xx (and throttling 4xx) - retry
    ClientError, // 4xx - NO retry (immediate fail)
    Unknown,     // Anything else - retry
}

impl FetchErrorKind {
    /// Returns true if this error kind should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchErrorKind::ClientError)
    }

    /// Classify a non-success HTTP status.
    ///
    /// 408 and 429 signal throttling rather than a bad request and are
    /// treated like server errors.
    pub fn from_status(status: u16) -> Self {
        match status {
            408 | 429 => FetchErrorKind::ServerError,
            400..=499 => FetchErrorKind::ClientError,
            500..=599 => FetchErrorKind::ServerError,
            _ => FetchErrorKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Timeout => "timeout",
            FetchErrorKind::Connection => "connection",
            FetchErrorKind::ServerError => "server_error",
            FetchErrorKind::ClientError => "client_error",
            FetchErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetch that failed after the retry policy gave up.
#[derive(Debug, Clone, Error)]
#[error("{kind} error fetching {url}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub url: String,
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Failure reported by an [`HttpTransport`](super::HttpTransport) before any
/// HTTP status was received.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A response as seen by the rest of the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// The URL that was requested.
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
