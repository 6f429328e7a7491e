//! Track name normalization.
//!
//! Turns a raw tracklist line into a lowercase fingerprint used for
//! downstream lookups (video search, release databases).

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref BRACKETED: Regex = Regex::new(r"\[.*?\]").expect("bracket pattern");
    static ref MIX_GROUP: Regex =
        Regex::new(r"\((.*?)(mix|remix|edit)(.*?)\)").expect("mix group pattern");
    static ref PUNCTUATION: Regex =
        Regex::new("[<>\"':\\-(){}_&\u{2014}\u{2013}+\u{00a0}]").expect("punctuation pattern");
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s]").expect("alnum pattern");
}

/// Normalize a raw track listing into a canonical identifier.
///
/// Never fails: input made only of metadata or symbols yields an empty string.
///
/// ```
/// use tracklist_digger::normalize::normalize;
/// assert_eq!(normalize("[03] KANDY & Purge - Pause [Free Track]"), "kandy purge pause");
/// ```
pub fn normalize(raw_text: &str) -> String {
    let without_brackets = BRACKETED.replace_all(raw_text, "");

    let ascii: String = without_brackets
        .nfkd()
        .filter(|c| c.is_ascii())
        .collect::<String>()
        .to_lowercase();

    let collapsed_mixes = MIX_GROUP.replace_all(&ascii, |caps: &Captures| {
        format!("({} {})", caps[1].trim(), caps[3].trim())
    });

    let without_punctuation = PUNCTUATION.replace_all(&collapsed_mixes, "");
    let alnum = NON_ALNUM.replace_all(&without_punctuation, "");

    alnum.split_whitespace().collect::<Vec<_>>().join(" ")
}
