//! Common test infrastructure
//!
//! End-to-end tests drive the real [`Digger`] against a scripted transport
//! serving fixture HTML. Nothing here touches the network.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestSite, ARTIST};
//!
//! #[test]
//! fn test_dig() {
//!     let site = TestSite::new();
//!     site.transport.page(common::CATEGORY_URL, common::category_page(&[], None));
//!     let report = site.digger().dig(ARTIST, Default::default()).unwrap();
//!     assert!(report.mixes.is_empty());
//! }
//! ```

mod constants;
mod fixtures;
mod transport;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::*;
pub use transport::{NoSleep, ScriptedTransport};

use std::sync::Arc;
use tracklist_digger::config::{AppConfig, CliConfig, FetchSettings, FileConfig};
use tracklist_digger::{Digger, Fetcher};

/// Fetch settings that never wait: no rate limit and no jitter. Retry
/// sleeps go to [`NoSleep`].
pub fn instant_fetch_settings() -> FetchSettings {
    FetchSettings {
        rate_limit_rpm: 0,
        max_jitter_ms: 0,
        cache_sweep_probability: 0.0,
        ..Default::default()
    }
}

/// A scripted copy of the mix database plus the configuration to dig it.
pub struct TestSite {
    pub transport: Arc<ScriptedTransport>,
    pub config: AppConfig,
}

impl TestSite {
    pub fn new() -> Self {
        Self::with_file_config(None)
    }

    #[allow(dead_code)]
    pub fn with_file_config(file_config: Option<FileConfig>) -> Self {
        let cli = CliConfig {
            base_url: BASE_URL.to_string(),
            ..Default::default()
        };
        let mut config = AppConfig::resolve(&cli, file_config).unwrap();
        config.fetch = FetchSettings {
            max_retries: config.fetch.max_retries,
            cache_expiry_secs: config.fetch.cache_expiry_secs,
            ..instant_fetch_settings()
        };

        Self {
            transport: Arc::new(ScriptedTransport::new()),
            config,
        }
    }

    pub fn fetcher(&self) -> Arc<Fetcher> {
        let fetcher = Fetcher::with_transport(Box::new(Arc::clone(&self.transport)), &self.config.fetch)
            .with_sleeper(Arc::new(NoSleep));
        Arc::new(fetcher)
    }

    pub fn digger(&self) -> Digger {
        Digger::with_fetcher(self.fetcher(), self.config.discovery.clone()).unwrap()
    }
}
