//! Discovery through the artist's category index.
//!
//! The listing is paginated; each page links to mix pages, and every mix
//! page is fetched on its own to extract the tracklist.

use lazy_static::lazy_static;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::dates::date_from_title;
use super::overrides::PaginationOverrides;
use super::pagination::find_next_page;
use super::{DiscoveryLimits, DiscoveryStrategy};
use crate::error::DiggerError;
use crate::extract::html::element_text;
use crate::extract::TracklistExtractor;
use crate::fetch::Fetcher;
use crate::models::Mix;

lazy_static! {
    static ref CATEGORY_LINKS: Selector =
        Selector::parse("#mw-pages li a, .mw-category li a").expect("category links selector");
    static ref CONTENT_LINKS: Selector =
        Selector::parse("#mw-content-text ul li a").expect("content links selector");
}

const NON_MIX_PREFIXES: &[&str] = &["Category:", "Special:", "File:"];

/// A mix page linked from the listing, before its tracklist is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct MixStub {
    pub title: String,
    pub url: String,
    pub date: Option<String>,
}

/// The result of resolving one stub. A failed tracklist fetch still yields
/// the mix, without tracks.
#[derive(Debug)]
pub struct MixOutcome {
    pub mix: Mix,
    pub error: Option<DiggerError>,
}

pub struct CategoryStrategy {
    fetcher: Arc<Fetcher>,
    extractor: TracklistExtractor,
    base_url: String,
    overrides: PaginationOverrides,
}

impl CategoryStrategy {
    pub fn new(
        fetcher: Arc<Fetcher>,
        extractor: TracklistExtractor,
        base_url: impl Into<String>,
        overrides: PaginationOverrides,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            base_url: base_url.into(),
            overrides,
        }
    }

    pub fn category_url(&self, artist: &str) -> String {
        let name = artist.trim().replace(' ', "_");
        format!(
            "{}/w/Category:{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&name)
        )
    }

    /// Walk the listing pages and collect mix stubs, deduplicated by URL
    /// in listing order.
    pub fn list_mix_pages(&self, artist: &str, max_pages: usize) -> Result<Vec<MixStub>, DiggerError> {
        let first = self.category_url(artist);
        let mut url = Url::parse(&first)
            .map_err(|e| DiggerError::Config(format!("Invalid category URL {}: {}", first, e)))?;

        let mut visited: HashSet<String> = HashSet::new();
        let mut seen_mixes: HashSet<String> = HashSet::new();
        let mut stubs = Vec::new();
        let max_pages = max_pages.max(1);

        for page_number in 1..=max_pages {
            visited.insert(url.to_string());

            let body = match self.fetcher.fetch(url.as_str()) {
                Ok(response) => response.body,
                Err(e) if page_number == 1 => return Err(e.into()),
                Err(e) => {
                    warn!(
                        "Category page {} for {} failed, keeping {} mixes found so far: {}",
                        page_number,
                        artist,
                        stubs.len(),
                        e
                    );
                    break;
                }
            };

            let document = Html::parse_document(&body);
            let page_stubs = parse_mix_stubs(&document, &url);
            debug!(
                "Category page {} for {} lists {} mix links",
                page_number,
                artist,
                page_stubs.len()
            );
            stubs.extend(
                page_stubs
                    .into_iter()
                    .filter(|stub| seen_mixes.insert(stub.url.clone())),
            );

            if page_number == max_pages {
                debug!("Reached the page cap ({}) for {}", max_pages, artist);
                break;
            }

            let next = match self.override_for(artist, page_number + 1) {
                Some(url) => Some(url),
                None => find_next_page(&document, &url).map(|(detector, url)| {
                    debug!("Next page for {} found by {}", artist, detector);
                    url
                }),
            };

            match next {
                Some(next) if visited.contains(next.as_str()) => {
                    debug!("Next page {} already visited, stopping", next);
                    break;
                }
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(stubs)
    }

    fn override_for(&self, artist: &str, page: usize) -> Option<Url> {
        let raw = self.overrides.lookup(artist, page)?;
        match Url::parse(raw) {
            Ok(url) => {
                debug!("Using pagination override for {} page {}", artist, page);
                Some(url)
            }
            Err(e) => {
                warn!("Ignoring invalid pagination override {}: {}", raw, e);
                None
            }
        }
    }

    /// Fetch a stub's page and extract its tracklist.
    pub fn resolve(&self, stub: MixStub) -> MixOutcome {
        match self.fetcher.fetch(&stub.url) {
            Ok(response) => {
                let tracks = self.extractor.extract(&stub.url, &response.body);
                MixOutcome {
                    mix: Mix::new(stub.title, stub.date, stub.url, tracks),
                    error: None,
                }
            }
            Err(e) => {
                warn!("Failed to fetch tracklist for {}: {}", stub.title, e);
                MixOutcome {
                    mix: Mix::new(stub.title, stub.date, stub.url, Vec::new()),
                    error: Some(e.into()),
                }
            }
        }
    }
}

impl DiscoveryStrategy for CategoryStrategy {
    fn name(&self) -> &'static str {
        "category"
    }

    fn discover(&self, artist: &str, limits: &DiscoveryLimits) -> Result<Vec<Mix>, DiggerError> {
        let stubs = self.list_mix_pages(artist, limits.max_pages)?;
        info!("Category listing for {} links {} mixes", artist, stubs.len());

        let outcomes: Vec<MixOutcome> = stubs.into_iter().map(|stub| self.resolve(stub)).collect();

        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        if failed > 0 {
            warn!(
                "{} of {} tracklist fetches failed for {}",
                failed,
                outcomes.len(),
                artist
            );
        }

        Ok(outcomes.into_iter().map(|o| o.mix).collect())
    }
}

fn is_mix_link(href: &str) -> bool {
    let decoded = urlencoding::decode(href)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| href.to_string());
    !decoded.starts_with('#')
        && !decoded.contains("action=")
        && !NON_MIX_PREFIXES
            .iter()
            .any(|prefix| decoded.contains(prefix))
}

fn stub_from_link(link: ElementRef, page_url: &Url) -> Option<MixStub> {
    let href = link.value().attr("href")?.trim();
    if href.is_empty() || !is_mix_link(href) {
        return None;
    }
    let mut url = page_url.join(href).ok()?;
    url.set_fragment(None);

    let title = link
        .value()
        .attr("title")
        .map(str::to_string)
        .unwrap_or_else(|| element_text(link));
    let date = date_from_title(&title);

    Some(MixStub {
        title,
        url: url.to_string(),
        date,
    })
}

/// Mix links on one listing page. The generic content-list selector is
/// only used when the category block has no links.
pub fn parse_mix_stubs(document: &Html, page_url: &Url) -> Vec<MixStub> {
    let mut stubs: Vec<MixStub> = document
        .select(&CATEGORY_LINKS)
        .filter_map(|link| stub_from_link(link, page_url))
        .collect();
    if stubs.is_empty() {
        stubs = document
            .select(&CONTENT_LINKS)
            .filter_map(|link| stub_from_link(link, page_url))
            .collect();
    }

    let mut seen = HashSet::new();
    stubs.retain(|stub| seen.insert(stub.url.clone()));
    stubs
}
