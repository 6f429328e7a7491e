//! Line-oriented scan for tracklists written as free text.
//!
//! A line is track-like when it starts with a timestamp or an index, or
//! reads like `Artist - Title`. Short lines right after a track are wrapped
//! titles and get appended to it. Fewer than [`MIN_TRACK_LINES`] track-like
//! lines means the blob is not a tracklist.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIMESTAMP: Regex =
        Regex::new(r"^[\[(]?\d{1,2}:\d{2}(?::\d{2})?[\])]?\s*\S").expect("timestamp pattern");
    static ref INDEXED: Regex =
        Regex::new(r"^(?:\[\d{1,3}\]|\(\d{1,3}\)|#?\d{1,3}[.)])\s*\S").expect("index pattern");
    static ref SEPARATOR: Regex =
        Regex::new(r"\S\s+[-\u{2013}\u{2014}]\s+\S").expect("separator pattern");
}

pub const MIN_TRACK_LINES: usize = 2;

/// `Artist - Title` lines shorter than this are not trusted on their own.
const MIN_SEPARATOR_LINE_CHARS: usize = 10;

/// Longest line still treated as the wrapped tail of the previous track.
const MAX_CONTINUATION_CHARS: usize = 40;

pub fn is_track_like(line: &str) -> bool {
    TIMESTAMP.is_match(line)
        || INDEXED.is_match(line)
        || (line.chars().count() >= MIN_SEPARATOR_LINE_CHARS && SEPARATOR.is_match(line))
}

/// Scan a text blob for a tracklist. Returns `None` unless at least
/// [`MIN_TRACK_LINES`] track-like lines were found.
pub fn scan_text(text: &str) -> Option<Vec<String>> {
    let mut tracks: Vec<String> = Vec::new();
    let mut track_lines = 0;
    let mut in_track = false;

    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            in_track = false;
            continue;
        }

        if is_track_like(&line) {
            tracks.push(line);
            track_lines += 1;
            in_track = true;
        } else if in_track && line.chars().count() <= MAX_CONTINUATION_CHARS {
            if let Some(previous) = tracks.last_mut() {
                previous.push(' ');
                previous.push_str(&line);
            }
        } else {
            in_track = false;
        }
    }

    if track_lines < MIN_TRACK_LINES {
        return None;
    }
    Some(tracks)
}
