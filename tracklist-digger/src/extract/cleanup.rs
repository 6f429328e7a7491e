//! Post-processing applied to every candidate tracklist.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::html::collapse_whitespace;

lazy_static! {
    /// Leading index or timestamp: `[03]`, `(3)`, `03.`, `3)`, `12:34`, `[1:02:03]`.
    static ref INDEX_PREFIX: Regex = Regex::new(
        r"^(?:\[\d{1,3}\]|\(\d{1,3}\)|\d{1,3}[.)]|\[?\d{1,2}:\d{2}(?::\d{2})?\]?)\s*"
    )
    .expect("index prefix pattern");
}

const MIN_TRACK_CHARS: usize = 4;

const BARE_SYMBOLS: &[char] = &['?', '-', '\u{2013}', '\u{2014}', '\u{2022}'];

const GENERIC_LABELS: &[&str] = &[
    "tracklist",
    "track list",
    "tracklisting",
    "track listing",
    "tracks",
    "setlist",
    "set list",
    "playlist",
    "play list",
];

fn is_bare_symbol(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_whitespace() || BARE_SYMBOLS.contains(&c))
}

/// True for entries that never represent a real track.
pub fn is_noise(text: &str) -> bool {
    if text.chars().count() < MIN_TRACK_CHARS {
        return true;
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    if is_bare_symbol(text) {
        return true;
    }

    // `[097] ?` marks an unidentified track; `[097]` alone carries nothing
    let rest = INDEX_PREFIX.replace(text, "");
    if rest.trim().is_empty() || is_bare_symbol(rest.trim()) {
        return true;
    }

    let label = text.trim_end_matches(':').trim().to_lowercase();
    GENERIC_LABELS.contains(&label.as_str())
}

/// Collapse whitespace, drop noise and exact duplicates. Order is preserved
/// and the first occurrence of a duplicate wins.
pub fn clean_entries<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .map(|entry| collapse_whitespace(&entry))
        .filter(|entry| !is_noise(entry))
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}
