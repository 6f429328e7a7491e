//! Known table layouts for specific mix pages.
//!
//! Some artists' pages carry the tracklist in a table whose shape is known
//! in advance. A [`TableLayout`] matched against the page URL lets the
//! extractor read those rows directly instead of running the cascade.

use lazy_static::lazy_static;
use scraper::Selector;
use serde::Deserialize;
use tracing::warn;

use super::html::cell_text;
use super::{Extractor, MixPage};
use crate::error::DiggerError;

lazy_static! {
    static ref ROWS: Selector = Selector::parse("tr").expect("tr selector");
}

fn default_table_selector() -> String {
    "table".to_string()
}

fn default_track_column() -> usize {
    1
}

fn default_header_rows() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableLayout {
    /// Case-insensitive substring of the page URL.
    pub url_pattern: String,
    #[serde(default = "default_table_selector")]
    pub table_selector: String,
    /// Zero-based cell index holding the track text.
    #[serde(default = "default_track_column")]
    pub track_column: usize,
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
}

impl TableLayout {
    pub fn matches(&self, url: &str) -> bool {
        url.to_lowercase()
            .contains(&self.url_pattern.to_lowercase())
    }
}

struct CompiledLayout {
    layout: TableLayout,
    table: Selector,
}

pub struct SiteTableExtractor {
    layouts: Vec<CompiledLayout>,
}

impl SiteTableExtractor {
    pub fn new(layouts: &[TableLayout]) -> Result<Self, DiggerError> {
        let layouts = layouts
            .iter()
            .map(|layout| {
                let table = Selector::parse(&layout.table_selector).map_err(|e| {
                    DiggerError::Config(format!(
                        "Invalid table_selector {:?}: {:?}",
                        layout.table_selector, e
                    ))
                })?;
                Ok(CompiledLayout {
                    layout: layout.clone(),
                    table,
                })
            })
            .collect::<Result<Vec<_>, DiggerError>>()?;
        Ok(Self { layouts })
    }

    fn rows_for(compiled: &CompiledLayout, page: &MixPage) -> Vec<String> {
        let Some(table) = page.document.select(&compiled.table).next() else {
            warn!(
                "Table layout {:?} matched {} but no table was found",
                compiled.layout.url_pattern, page.url
            );
            return Vec::new();
        };

        table
            .select(&ROWS)
            .skip(compiled.layout.header_rows)
            .filter_map(|row| cell_text(row, compiled.layout.track_column))
            .collect()
    }
}

impl Extractor for SiteTableExtractor {
    fn name(&self) -> &'static str {
        "site_table"
    }

    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>> {
        let compiled = self.layouts.iter().find(|c| c.layout.matches(page.url))?;
        let rows = Self::rows_for(compiled, page);
        (!rows.is_empty()).then_some(rows)
    }
}
