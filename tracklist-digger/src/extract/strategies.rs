//! The general-purpose extraction strategies, in cascade order.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::html::{
    block_text, cell_text, element_text, heading_anchor, is_heading, leading_list_items,
    list_item_texts, next_element_sibling, row_cells, section_siblings, HEADINGS,
};
use super::text_scan::scan_text;
use super::{Extractor, MixPage};

lazy_static! {
    static ref CONTAINERS: Selector = Selector::parse(
        "div.tracklist, div#tracklist, div.tracklist-container, div.ExplorerTracklist, div#Tracklist"
    )
    .expect("tracklist container selector");
    static ref SCRIPTS: Selector = Selector::parse("script").expect("script selector");
    static ref LIST_ITEMS: Selector = Selector::parse("li").expect("li selector");
    static ref TABLES: Selector = Selector::parse("table").expect("table selector");
    static ref ROWS: Selector = Selector::parse("tr").expect("tr selector");
    static ref PLAYERS: Selector = Selector::parse(
        "iframe, embed, object, audio, div.player, div.mixcloud, div.soundcloud"
    )
    .expect("player selector");
    static ref PRE_BLOCKS: Selector = Selector::parse("pre").expect("pre selector");
    static ref CONTENT_AREAS: Vec<Selector> = [
        "#mw-content-text",
        ".mw-parser-output",
        "#content",
        "main",
        "body",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("content area selector"))
    .collect();
}

const PAGE_CONFIG_CALL: &str = "mw.config.set(";

const TABLE_HEADER_WORDS: &[&str] = &["track", "title", "artist", "time"];

fn has_text_blocks(element: &ElementRef) -> bool {
    matches!(element.value().name(), "p" | "div" | "pre" | "dl")
}

fn headings_containing<'a>(page: &'a MixPage, needles: &[&str]) -> Vec<ElementRef<'a>> {
    page.document
        .select(&HEADINGS)
        .filter(|heading| {
            let text = element_text(*heading).to_lowercase();
            needles.iter().any(|needle| text.contains(needle))
        })
        .collect()
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

/// A "Tracklist" heading followed by a list, or by text up to the next heading.
pub struct LabeledSectionExtractor;

impl Extractor for LabeledSectionExtractor {
    fn name(&self) -> &'static str {
        "labeled_section"
    }

    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>> {
        for heading in headings_containing(page, &["tracklist"]) {
            let section = section_siblings(heading_anchor(heading));

            for list_tag in ["ol", "ul"] {
                let items = leading_list_items(&section, list_tag);
                if !items.is_empty() {
                    return Some(items);
                }
            }

            let text = section
                .iter()
                .filter(|sibling| has_text_blocks(sibling))
                .map(|sibling| block_text(*sibling))
                .collect::<Vec<_>>()
                .join("\n");
            if let Some(lines) = scan_text(&text) {
                return Some(lines);
            }
        }
        None
    }
}

/// A block dedicated to the tracklist, holding ordered lists.
pub struct DedicatedContainerExtractor;

impl Extractor for DedicatedContainerExtractor {
    fn name(&self) -> &'static str {
        "dedicated_container"
    }

    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>> {
        page.document
            .select(&CONTAINERS)
            .map(|container| list_item_texts(container, "ol"))
            .find(|items| !items.is_empty())
    }
}

/// Tracklist HTML embedded in the page's `mw.config.set({...})` script
/// under `pageAffTl.tl`.
pub struct EmbeddedConfigExtractor;

impl EmbeddedConfigExtractor {
    fn tracklist_html(script: &str) -> Option<String> {
        let start = script.find(PAGE_CONFIG_CALL)? + PAGE_CONFIG_CALL.len();
        let config = serde_json::Deserializer::from_str(&script[start..])
            .into_iter::<Value>()
            .next()?
            .ok()?;
        config
            .get("pageAffTl")?
            .get("tl")?
            .as_str()
            .map(str::to_string)
    }
}

impl Extractor for EmbeddedConfigExtractor {
    fn name(&self) -> &'static str {
        "embedded_config"
    }

    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>> {
        let fragment = page
            .document
            .select(&SCRIPTS)
            .map(|script| script.text().collect::<String>())
            .find_map(|script| Self::tracklist_html(&script))?;

        let fragment = Html::parse_fragment(&fragment);
        non_empty(
            fragment
                .select(&LIST_ITEMS)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect(),
        )
    }
}

/// Any tracklist heading immediately followed by an ordered list.
pub struct HeadingSiblingListExtractor;

impl Extractor for HeadingSiblingListExtractor {
    fn name(&self) -> &'static str {
        "heading_sibling_list"
    }

    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>> {
        headings_containing(page, &["tracklist", "track list"])
            .into_iter()
            .filter_map(|heading| next_element_sibling(heading_anchor(heading)))
            .filter_map(|next| match next.value().name() {
                "ol" => Some(next),
                "div" => next
                    .children()
                    .find_map(ElementRef::wrap)
                    .filter(|first| first.value().name() == "ol"),
                _ => None,
            })
            .map(|list| list_item_texts(list, "ol"))
            .find(|items| !items.is_empty())
    }
}

/// A table whose header mentions tracks, titles, artists or times. The
/// second column of each data row is taken as the track.
pub struct StructuredTableExtractor;

impl StructuredTableExtractor {
    fn table_tracks(table: ElementRef) -> Option<Vec<String>> {
        let mut rows = table.select(&ROWS);
        let header = row_cells(rows.next()?);
        let is_track_table = header.iter().any(|cell| {
            let text = element_text(*cell).to_lowercase();
            TABLE_HEADER_WORDS.iter().any(|word| text.contains(word))
        });
        if !is_track_table {
            return None;
        }

        let column = if header.len() > 1 { 1 } else { 0 };
        non_empty(rows.filter_map(|row| cell_text(row, column)).collect())
    }
}

impl Extractor for StructuredTableExtractor {
    fn name(&self) -> &'static str {
        "structured_table"
    }

    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>> {
        page.document.select(&TABLES).find_map(Self::table_tracks)
    }
}

/// Line-pattern scan over text blobs: text next to an embedded player,
/// then `<pre>` blocks, then the whole content area.
pub struct FreeTextExtractor;

impl FreeTextExtractor {
    fn player_adjacent_text(page: &MixPage) -> Vec<String> {
        page.document
            .select(&PLAYERS)
            .map(|player| {
                // Players are often wrapped alone in a paragraph
                let anchor = if next_element_sibling(player).is_none() {
                    player
                        .parent()
                        .and_then(ElementRef::wrap)
                        .filter(|parent| !is_heading(parent))
                        .unwrap_or(player)
                } else {
                    player
                };
                section_siblings(anchor)
                    .into_iter()
                    .filter(has_text_blocks)
                    .map(block_text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect()
    }

    fn pre_text(page: &MixPage) -> Vec<String> {
        page.document.select(&PRE_BLOCKS).map(block_text).collect()
    }

    fn content_text(page: &MixPage) -> Option<String> {
        CONTENT_AREAS
            .iter()
            .find_map(|selector| page.document.select(selector).next())
            .map(block_text)
    }
}

impl Extractor for FreeTextExtractor {
    fn name(&self) -> &'static str {
        "free_text"
    }

    fn try_extract(&self, page: &MixPage) -> Option<Vec<String>> {
        if let Some(lines) = Self::player_adjacent_text(page)
            .iter()
            .find_map(|blob| scan_text(blob))
        {
            debug!("Free-text tracklist found next to a player on {}", page.url);
            return Some(lines);
        }
        if let Some(lines) = Self::pre_text(page).iter().find_map(|blob| scan_text(blob)) {
            return Some(lines);
        }
        Self::content_text(page).and_then(|blob| scan_text(&blob))
    }
}
