//! Mix-page tracklist extraction.
//!
//! A page is run through an ordered cascade of [`Extractor`]s. The first
//! one whose output survives [`clean_entries`] wins; the rest are skipped.
//! Nothing in here fails on malformed markup: a page without a
//! recognisable tracklist simply yields no tracks.

mod cleanup;
pub(crate) mod html;
mod site_tables;
mod strategies;
pub mod text_scan;

pub use cleanup::{clean_entries, is_noise};
pub use site_tables::{SiteTableExtractor, TableLayout};
pub use strategies::{
    DedicatedContainerExtractor, EmbeddedConfigExtractor, FreeTextExtractor,
    HeadingSiblingListExtractor, LabeledSectionExtractor, StructuredTableExtractor,
};

use scraper::Html;
use tracing::debug;

use crate::error::DiggerError;
use crate::models::Track;

/// A parsed mix page.
pub struct MixPage<'a> {
    pub url: &'a str,
    pub document: Html,
}

impl<'a> MixPage<'a> {
    pub fn parse(url: &'a str, html: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(html),
        }
    }
}

/// One heuristic for finding a tracklist on a page. Returns the raw entry
/// texts, or `None` when the page does not have the shape it looks for.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>>;
}

pub struct TracklistExtractor {
    strategies: Vec<Box<dyn Extractor>>,
}

impl TracklistExtractor {
    /// The full cascade, with a site-table fast path when `layouts` is non-empty.
    pub fn new(layouts: &[TableLayout]) -> Result<Self, DiggerError> {
        let mut strategies: Vec<Box<dyn Extractor>> = Vec::new();
        if !layouts.is_empty() {
            strategies.push(Box::new(SiteTableExtractor::new(layouts)?));
        }
        strategies.extend(general_strategies());
        Ok(Self { strategies })
    }

    pub fn with_strategies(strategies: Vec<Box<dyn Extractor>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn extract(&self, url: &str, html: &str) -> Vec<Track> {
        let page = MixPage::parse(url, html);

        for strategy in &self.strategies {
            let Some(entries) = strategy.try_extract(&page) else {
                continue;
            };
            let cleaned = clean_entries(entries);
            if cleaned.is_empty() {
                debug!(
                    "Strategy {} matched {} but nothing survived cleanup",
                    strategy.name(),
                    url
                );
                continue;
            }

            debug!(
                "Strategy {} extracted {} tracks from {}",
                strategy.name(),
                cleaned.len(),
                url
            );
            return cleaned.into_iter().map(Track::new).collect();
        }

        debug!("No tracklist found on {}", url);
        Vec::new()
    }
}

impl Default for TracklistExtractor {
    fn default() -> Self {
        Self::with_strategies(general_strategies())
    }
}

fn general_strategies() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(LabeledSectionExtractor),
        Box::new(DedicatedContainerExtractor),
        Box::new(EmbeddedConfigExtractor),
        Box::new(HeadingSiblingListExtractor),
        Box::new(StructuredTableExtractor),
        Box::new(FreeTextExtractor),
    ]
}

/// Extract a tracklist with the default cascade.
pub fn extract_tracklist(url: &str, html: &str) -> Vec<Track> {
    TracklistExtractor::default().extract(url, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.mixesdb.com/w/2019-03-01_-_Efdemin_-_Rinse";

    fn raw(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.raw_text()).collect()
    }

    #[test]
    fn test_cascade_order() {
        let extractor = TracklistExtractor::new(&[TableLayout {
            url_pattern: "efdemin".to_string(),
            table_selector: "table".to_string(),
            track_column: 1,
            header_rows: 1,
        }])
        .unwrap();
        assert_eq!(
            extractor.strategy_names(),
            vec![
                "site_table",
                "labeled_section",
                "dedicated_container",
                "embedded_config",
                "heading_sibling_list",
                "structured_table",
                "free_text"
            ]
        );
        assert_eq!(TracklistExtractor::default().strategy_names().len(), 6);
    }

    #[test]
    fn test_first_success_short_circuits() {
        let html = r#"
            <h2>Tracklist</h2>
            <ol><li>[01] Efdemin - America</li><li>[02] Edward - Sender</li></ol>
            <div class="tracklist"><ol><li>Other - Track</li></ol></div>"#;
        let tracks = extract_tracklist(URL, html);
        assert_eq!(raw(&tracks), vec!["[01] Efdemin - America", "[02] Edward - Sender"]);
        assert_eq!(tracks[0].normalized_id(), "efdemin america");
    }

    #[test]
    fn test_noise_only_match_falls_through() {
        // The labeled section only holds placeholders; the container wins.
        let html = r#"
            <h2>Tracklist</h2>
            <ol><li>?</li><li>[02] ?</li></ol>
            <h2>Player</h2>
            <div class="tracklist"><ol><li>Antias - Nordic</li></ol></div>"#;
        let tracks = extract_tracklist(URL, html);
        assert_eq!(raw(&tracks), vec!["Antias - Nordic"]);
    }

    #[test]
    fn test_post_processing_applies_to_every_strategy() {
        let html = r#"<div class="tracklist"><ol>
            <li>Tracklist</li>
            <li>1. Efdemin - America</li>
            <li>?</li>
            <li>42</li>
            <li>1. Efdemin - America</li>
        </ol></div>"#;
        let tracks = extract_tracklist(URL, html);
        assert_eq!(raw(&tracks), vec!["1. Efdemin - America"]);
    }

    #[test]
    fn test_site_table_fast_path() {
        let html = r#"
            <h2>Tracklist</h2><ol><li>From the list - Ignored</li></ol>
            <table><tr><th>#</th><th>Track</th></tr><tr><td>1</td><td>From the table - Used</td></tr></table>"#;
        let extractor = TracklistExtractor::new(&[TableLayout {
            url_pattern: "_-_Efdemin_-_".to_string(),
            table_selector: "table".to_string(),
            track_column: 1,
            header_rows: 1,
        }])
        .unwrap();
        assert_eq!(raw(&extractor.extract(URL, html)), vec!["From the table - Used"]);
    }

    #[test]
    fn test_malformed_or_empty_pages_yield_nothing() {
        assert!(extract_tracklist(URL, "").is_empty());
        assert!(extract_tracklist(URL, "<div><p>unclosed <b>tags").is_empty());
        assert!(extract_tracklist(URL, "<p>Just a description of the mix.</p>").is_empty());
    }
}
