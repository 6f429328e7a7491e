//! HTTP fetch layer: retry with backoff, a global rate limiter and a
//! time-expiring response cache in front of a pluggable transport.

pub mod cache;
mod client;
mod models;
pub mod rate_limit;
pub mod retry_policy;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{Fetcher, Sleeper, ThreadSleeper};
pub use models::{FetchError, FetchErrorKind, FetchResponse, TransportError};
pub use retry_policy::RetryPolicy;
pub use transport::{HttpTransport, ReqwestTransport};
