//! Tracklist Digger Library
//!
//! Finds an artist's DJ mixes on a MediaWiki-based mix database, extracts
//! each mix's tracklist and normalizes track names into fingerprints.

pub mod config;
pub mod digger;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod normalize;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use digger::{merge_results, DigOptions, DigReport, DigStats, Digger};
pub use error::DiggerError;
pub use extract::{extract_tracklist, TracklistExtractor};
pub use fetch::{Fetcher, HttpTransport};
pub use models::{Mix, Track};
pub use normalize::normalize;
