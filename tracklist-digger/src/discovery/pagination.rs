//! "Next page" detection for category listings.
//!
//! The link format differs between artists and skins, so detection is a
//! prioritized list of independent detectors. The first one to return a
//! URL wins.

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::extract::html::element_text;

pub type PageDetector = fn(&Html, &Url) -> Option<Url>;

/// Detectors in the order they are tried.
pub const DETECTORS: &[(&str, PageDetector)] = &[
    ("paginated_navigation", paginated_navigation),
    ("pages_listing", pages_listing),
    ("generic_pagination", generic_pagination),
    ("link_scan", link_scan),
];

lazy_static! {
    static ref CATEGORY_NAV: Selector =
        Selector::parse(".mw-category-generated a, #mw-pages > a").expect("category nav selector");
    static ref PAGES_LISTING: Selector =
        Selector::parse("#mw-pages a, .mw-pages a, #pagesListing a").expect("pages listing selector");
    static ref PAGINATION: Selector =
        Selector::parse(".pagination a, .paginationNav a, a[rel=\"next\"]").expect("pagination selector");
    static ref ALL_LINKS: Selector = Selector::parse("a[href]").expect("link selector");
    static ref NEXT_LABEL: Regex =
        Regex::new(r"^\(?next(?: page)?(?: \d+)?\)?(?: ?[\x{203a}\x{00bb}>]+)?$")
            .expect("next label pattern");
}

const CURSOR_PARAM: &str = "pagefrom=";

/// Resolve a link against the page it was found on. Fragments are dropped
/// so the same page is recognised when revisited.
fn resolve(link: ElementRef, current: &Url) -> Option<Url> {
    let href = link.value().attr("href")?.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    let mut url = current.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}

fn link_text(link: ElementRef) -> String {
    element_text(link).to_lowercase()
}

/// The whole link text is a pagination label: "next", "next page" or
/// "next 200", optionally parenthesized or followed by an arrow.
fn is_next_label(text: &str) -> bool {
    NEXT_LABEL.is_match(text.trim())
}

/// Links inside listing items are entries, never pagination.
fn in_listing_item(link: ElementRef) -> bool {
    link.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
        let el = ancestor.value();
        el.name() == "li" || el.classes().any(|c| c == "mw-category")
    })
}

fn is_next_link(link: ElementRef) -> bool {
    !in_listing_item(link) && is_next_label(&link_text(link))
}

/// MediaWiki's "(next page)" link in the generated category listing.
pub fn paginated_navigation(document: &Html, current: &Url) -> Option<Url> {
    document
        .select(&CATEGORY_NAV)
        .filter(|link| is_next_link(*link) && link_text(*link).contains("next page"))
        .find_map(|link| resolve(link, current))
}

/// A "next" link in the pages block.
pub fn pages_listing(document: &Html, current: &Url) -> Option<Url> {
    document
        .select(&PAGES_LISTING)
        .filter(|link| is_next_link(*link))
        .find_map(|link| resolve(link, current))
}

/// Skin-level pagination widgets and `rel="next"` links.
pub fn generic_pagination(document: &Html, current: &Url) -> Option<Url> {
    document
        .select(&PAGINATION)
        .filter(|link| {
            let text = link_text(*link);
            link.value().attr("rel") == Some("next")
                || text.contains("next")
                || matches!(text.trim(), "\u{203a}" | "\u{00bb}" | ">" | ">>")
        })
        .find_map(|link| resolve(link, current))
}

/// Last resort: any link reading like "next 200", or carrying a
/// pagination cursor in its query. Listing items are skipped.
pub fn link_scan(document: &Html, current: &Url) -> Option<Url> {
    document
        .select(&ALL_LINKS)
        .filter(|link| !in_listing_item(*link))
        .filter(|link| {
            let text = link_text(*link);
            let counted_next = is_next_label(&text) && text.chars().any(|c| c.is_ascii_digit());
            let has_cursor = link
                .value()
                .attr("href")
                .is_some_and(|href| href.contains(CURSOR_PARAM));
            counted_next || has_cursor
        })
        .find_map(|link| resolve(link, current))
}

/// Run the detectors in order, returning the first next-page URL found
/// together with the name of the detector that found it.
pub fn find_next_page(document: &Html, current: &Url) -> Option<(&'static str, Url)> {
    DETECTORS
        .iter()
        .find_map(|(name, detect)| detect(document, current).map(|url| (*name, url)))
}
