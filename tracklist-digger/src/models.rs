//! Mix and track models handed to callers.
//!
//! The JSON shape matches what the web front end consumes:
//!
//! ```text
//! { "title": "...", "date": "...", "url": "...",
//!   "tracks": [ { "track": "...", "id": "..." } ],
//!   "has_tracklist": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Placeholder title for mixes whose listing entry has no usable text.
pub const UNTITLED_MIX: &str = "Untitled mix";

/// Sentinel date for mixes whose date could not be extracted.
pub const UNKNOWN_DATE: &str = "unknown";

/// One line item within a mix's tracklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// The extracted text, e.g. `[03] KANDY & Purge - Pause [Free Track]`.
    #[serde(rename = "track")]
    raw_text: String,
    /// Fingerprint produced by [`normalize`]. May be empty.
    #[serde(rename = "id")]
    normalized_id: String,
}

impl Track {
    pub fn new(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let normalized_id = normalize(&raw_text);
        Self {
            raw_text,
            normalized_id,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_id(&self) -> &str {
        &self.normalized_id
    }
}

/// A DJ set page on the source site together with its tracklist.
///
/// Mixes are fully populated when created and never mutated afterwards.
/// Two mixes are considered the same entity when their titles are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MixRecord", from = "MixRecord")]
pub struct Mix {
    title: String,
    date: String,
    source_url: String,
    tracks: Vec<Track>,
}

impl Mix {
    /// Create a mix. Blank titles and dates fall back to their placeholders.
    pub fn new(
        title: impl Into<String>,
        date: Option<String>,
        source_url: impl Into<String>,
        tracks: Vec<Track>,
    ) -> Self {
        let title = title.into().trim().to_string();
        let title = if title.is_empty() {
            UNTITLED_MIX.to_string()
        } else {
            title
        };
        let date = date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        Self {
            title,
            date,
            source_url: source_url.into(),
            tracks,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// True iff the mix has at least one track.
    pub fn has_tracklist(&self) -> bool {
        !self.tracks.is_empty()
    }
}

/// Wire representation of a [`Mix`]. `has_tracklist` is written for
/// consumers but recomputed on the way back in.
#[derive(Serialize, Deserialize)]
struct MixRecord {
    title: String,
    date: String,
    url: String,
    #[serde(default)]
    tracks: Vec<Track>,
    #[serde(default)]
    has_tracklist: bool,
}

impl From<Mix> for MixRecord {
    fn from(mix: Mix) -> Self {
        let has_tracklist = mix.has_tracklist();
        Self {
            title: mix.title,
            date: mix.date,
            url: mix.source_url,
            tracks: mix.tracks,
            has_tracklist,
        }
    }
}

impl From<MixRecord> for Mix {
    fn from(record: MixRecord) -> Self {
        Mix::new(record.title, Some(record.date), record.url, record.tracks)
    }
}
