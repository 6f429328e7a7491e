//! Discovery through the site's mix explorer.
//!
//! Explorer result pages embed each mix's tracklist inline, so no per-mix
//! fetch is needed. Results come in pages of [`PAGE_SIZE`] selected by an
//! `offset` query parameter.

use lazy_static::lazy_static;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::dates::{date_from_title, parenthesized_date};
use super::{DiscoveryLimits, DiscoveryStrategy};
use crate::error::DiggerError;
use crate::extract::clean_entries;
use crate::extract::html::{element_text, HEADINGS};
use crate::fetch::Fetcher;
use crate::models::{Mix, Track};

pub const PAGE_SIZE: usize = 25;

const EXPLORER_PATH: &str = "/w/MixesDB:Explorer/Mixes";

lazy_static! {
    static ref RESULT_COUNT: Selector =
        Selector::parse("span.explorerRes b").expect("result count selector");
    static ref RESULTS: Selector = Selector::parse("div.explorerResult").expect("result selector");
    static ref EXPLORER_TRACKS: Selector =
        Selector::parse("div.ExplorerTracklist ol li").expect("explorer tracks selector");
    static ref ANY_TRACKS: Selector = Selector::parse("ol li").expect("ol li selector");
    static ref LINKS: Selector = Selector::parse("a[href]").expect("link selector");
}

pub struct ExplorerStrategy {
    fetcher: Arc<Fetcher>,
    base_url: String,
    large_catalog_cap: usize,
}

impl ExplorerStrategy {
    pub fn new(fetcher: Arc<Fetcher>, base_url: impl Into<String>, large_catalog_cap: usize) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            large_catalog_cap,
        }
    }

    /// The explorer query for `artist` starting at `offset`. Parameters keep
    /// the order the site's own form submits them in.
    pub fn query_url(&self, artist: &str, offset: usize) -> Result<Url, DiggerError> {
        let base = format!("{}{}", self.base_url.trim_end_matches('/'), EXPLORER_PATH);
        let mut url = Url::parse(&base)
            .map_err(|e| DiggerError::Config(format!("Invalid explorer URL {}: {}", base, e)))?;

        let offset = offset.to_string();
        let count = PAGE_SIZE.to_string();
        url.query_pairs_mut()
            .append_pair("do", "mx")
            .append_pair("mode", "")
            .append_pair("cat1", artist.trim())
            .append_pair("cat2", "")
            .append_pair("jnC", "")
            .append_pair("style", "")
            .append_pair("year", "")
            .append_pair("tlC", "1")
            .append_pair("tlI", "1")
            .append_pair("so", "")
            .append_pair("tmatch1", "")
            .append_pair("tmatch2", "")
            .append_pair("jnTm", "")
            .append_pair("usesFile", "")
            .append_pair("minHotnessLevel", "")
            .append_pair("count", &count)
            .append_pair("order", "name")
            .append_pair("sort", "desc")
            .append_pair("offset", &offset);
        Ok(url)
    }

    /// How many results to collect given the reported total.
    pub fn item_limit(&self, total: usize, limits: &DiscoveryLimits) -> usize {
        let limit = total.min(limits.max_items);
        if !limits.explicit_item_cap && total > self.large_catalog_cap {
            limit.min(self.large_catalog_cap)
        } else {
            limit
        }
    }

    fn fetch_page(&self, url: &Url) -> Result<Html, DiggerError> {
        let response = self.fetcher.fetch(url.as_str())?;
        Ok(Html::parse_document(&response.body))
    }
}

impl DiscoveryStrategy for ExplorerStrategy {
    fn name(&self) -> &'static str {
        "explorer"
    }

    fn discover(&self, artist: &str, limits: &DiscoveryLimits) -> Result<Vec<Mix>, DiggerError> {
        let first_url = self.query_url(artist, 0)?;
        let document = self.fetch_page(&first_url)?;

        let total = result_count(&document).unwrap_or_else(|| {
            let visible = document.select(&RESULTS).count();
            debug!("No result count on explorer page, counted {} rows", visible);
            visible
        });
        let limit = self.item_limit(total, limits);
        info!(
            "Explorer reports {} mixes for {}, collecting up to {}",
            total, artist, limit
        );

        let mut mixes = parse_results(&document, &first_url);
        let mut offset = PAGE_SIZE;
        while offset < limit && mixes.len() < limit {
            let url = self.query_url(artist, offset)?;
            let page_mixes = match self.fetch_page(&url) {
                Ok(document) => parse_results(&document, &url),
                Err(e) => {
                    warn!(
                        "Explorer page at offset {} for {} failed, keeping {} mixes: {}",
                        offset,
                        artist,
                        mixes.len(),
                        e
                    );
                    break;
                }
            };
            if page_mixes.is_empty() {
                debug!("Explorer page at offset {} is empty, stopping", offset);
                break;
            }
            mixes.extend(page_mixes);
            offset += PAGE_SIZE;
        }

        mixes.truncate(limit);
        Ok(mixes)
    }
}

/// The total from the `span.explorerRes` summary, e.g. `<b>1,204</b>`.
pub fn result_count(document: &Html) -> Option<usize> {
    let text = element_text(document.select(&RESULT_COUNT).next()?);
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Every result block on an explorer page, in page order. Blocks without
/// a mix link are skipped.
pub fn parse_results(document: &Html, page_url: &Url) -> Vec<Mix> {
    document
        .select(&RESULTS)
        .filter_map(|block| parse_result(block, page_url))
        .collect()
}

fn parse_result(block: ElementRef, page_url: &Url) -> Option<Mix> {
    let heading = block.select(&HEADINGS).next();
    let link = heading
        .and_then(|h| h.select(&LINKS).next())
        .or_else(|| block.select(&LINKS).next())?;

    let title = link
        .value()
        .attr("title")
        .map(str::to_string)
        .unwrap_or_else(|| element_text(link));
    if title.trim().is_empty() {
        return None;
    }
    let mut source_url = page_url.join(link.value().attr("href")?).ok()?;
    source_url.set_fragment(None);

    let heading_text = heading.map(element_text).unwrap_or_default();
    let date = parenthesized_date(&heading_text).or_else(|| date_from_title(&title));

    let mut entries: Vec<String> = block.select(&EXPLORER_TRACKS).map(element_text).collect();
    if entries.is_empty() {
        entries = block.select(&ANY_TRACKS).map(element_text).collect();
    }
    let tracks = clean_entries(entries).into_iter().map(Track::new).collect();

    Some(Mix::new(title, date, source_url.to_string(), tracks))
}
