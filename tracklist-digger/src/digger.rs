//! Runs both discovery strategies for an artist and merges their results.
//!
//! ## Merge rule
//!
//! ```text
//! category results empty  → all explorer results
//! otherwise               → category results
//!                           + explorer mixes with a tracklist and an unseen title
//! ```
//!
//! A failing strategy is logged and contributes nothing; it never fails
//! the whole run.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{AppConfig, DiscoverySettings};
use crate::discovery::{
    CategoryStrategy, DiscoveryLimits, DiscoveryStrategy, ExplorerStrategy, PaginationOverrides,
};
use crate::error::DiggerError;
use crate::extract::TracklistExtractor;
use crate::fetch::Fetcher;
use crate::models::Mix;

/// Per-call caps. `None` falls back to the configured defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigOptions {
    pub max_pages: Option<usize>,
    pub max_items: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DigStats {
    pub total_mixes: usize,
    pub mixes_with_tracklists: usize,
    pub total_tracks: usize,
}

impl DigStats {
    pub fn from_mixes(mixes: &[Mix]) -> Self {
        Self {
            total_mixes: mixes.len(),
            mixes_with_tracklists: mixes.iter().filter(|m| m.has_tracklist()).count(),
            total_tracks: mixes.iter().map(|m| m.tracks().len()).sum(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DigReport {
    pub mixes: Vec<Mix>,
    pub stats: DigStats,
    pub category_error: Option<String>,
    pub explorer_error: Option<String>,
}

impl DigReport {
    /// Both strategies failed, as opposed to an artist without mixes.
    pub fn is_total_failure(&self) -> bool {
        self.category_error.is_some() && self.explorer_error.is_some()
    }
}

pub struct Digger {
    category: Box<dyn DiscoveryStrategy>,
    explorer: Box<dyn DiscoveryStrategy>,
    settings: DiscoverySettings,
}

impl Digger {
    pub fn new(
        category: Box<dyn DiscoveryStrategy>,
        explorer: Box<dyn DiscoveryStrategy>,
        settings: DiscoverySettings,
    ) -> Self {
        Self {
            category,
            explorer,
            settings,
        }
    }

    /// Wire both strategies to one shared fetcher, so the cache and the rate
    /// limit span the whole run.
    pub fn with_fetcher(fetcher: Arc<Fetcher>, settings: DiscoverySettings) -> Result<Self, DiggerError> {
        let extractor = TracklistExtractor::new(&settings.table_layouts)?;
        let category = CategoryStrategy::new(
            Arc::clone(&fetcher),
            extractor,
            settings.base_url.clone(),
            PaginationOverrides::new(settings.pagination_overrides.clone()),
        );
        let explorer = ExplorerStrategy::new(
            fetcher,
            settings.base_url.clone(),
            settings.large_catalog_cap,
        );
        Ok(Self::new(Box::new(category), Box::new(explorer), settings))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DiggerError> {
        let fetcher = Arc::new(Fetcher::new(&config.fetch)?);
        Self::with_fetcher(fetcher, config.discovery.clone())
    }

    fn limits(&self, options: DigOptions) -> DiscoveryLimits {
        DiscoveryLimits {
            max_pages: options.max_pages.unwrap_or(self.settings.max_pagination_pages),
            max_items: options.max_items.unwrap_or(self.settings.max_explorer_items),
            explicit_item_cap: options.max_items.is_some(),
        }
    }

    fn run_strategy(
        strategy: &dyn DiscoveryStrategy,
        artist: &str,
        limits: &DiscoveryLimits,
    ) -> (Vec<Mix>, Option<String>) {
        match strategy.discover(artist, limits) {
            Ok(mixes) => {
                info!(
                    "Strategy {} found {} mixes for {}",
                    strategy.name(),
                    mixes.len(),
                    artist
                );
                (mixes, None)
            }
            Err(e) => {
                warn!("Strategy {} failed for {}: {}", strategy.name(), artist, e);
                (Vec::new(), Some(e.to_string()))
            }
        }
    }

    /// Discover, merge and summarize. Only an empty artist name is an error.
    pub fn dig(&self, artist: &str, options: DigOptions) -> Result<DigReport, DiggerError> {
        let artist = artist.trim();
        if artist.is_empty() {
            return Err(DiggerError::InvalidArgument(
                "artist name must not be empty".to_string(),
            ));
        }

        let limits = self.limits(options);
        info!(
            "Digging mixes for {} (max {} pages, max {} items)",
            artist, limits.max_pages, limits.max_items
        );

        let (category_mixes, category_error) =
            Self::run_strategy(self.category.as_ref(), artist, &limits);
        let (explorer_mixes, explorer_error) =
            Self::run_strategy(self.explorer.as_ref(), artist, &limits);

        let mixes = merge_results(category_mixes, explorer_mixes);
        let stats = DigStats::from_mixes(&mixes);
        info!(
            "Found {} mixes for {} ({} with tracklists, {} tracks)",
            stats.total_mixes, artist, stats.mixes_with_tracklists, stats.total_tracks
        );

        let report = DigReport {
            mixes,
            stats,
            category_error,
            explorer_error,
        };
        if report.is_total_failure() {
            error!("Both discovery strategies failed for {}", artist);
        }
        Ok(report)
    }

    /// The merged mixes only; total failure reads as an empty list.
    pub fn find_mixes(&self, artist: &str, options: DigOptions) -> Result<Vec<Mix>, DiggerError> {
        self.dig(artist, options).map(|report| report.mixes)
    }
}

/// Category results win. Explorer mixes are added only when they carry a
/// tracklist and their title has not been seen yet; if the category strategy
/// found nothing, every explorer mix is kept.
pub fn merge_results(category: Vec<Mix>, explorer: Vec<Mix>) -> Vec<Mix> {
    if category.is_empty() {
        return explorer;
    }

    let mut seen: HashSet<String> = category.iter().map(|m| m.title().to_string()).collect();
    let mut merged = category;
    for mix in explorer {
        if mix.has_tracklist() && seen.insert(mix.title().to_string()) {
            merged.push(mix);
        }
    }
    merged
}
