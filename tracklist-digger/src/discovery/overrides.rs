//! Per-artist category pagination overrides, loaded from the config file.

use serde::Deserialize;

fn default_page() -> usize {
    2
}

/// A known URL for one page of an artist's category listing, used when the
/// page's own "next" link cannot be detected.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaginationOverride {
    pub artist: String,
    /// 1-based page number, 2 or later.
    #[serde(default = "default_page")]
    pub page: usize,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct PaginationOverrides {
    entries: Vec<PaginationOverride>,
}

impl PaginationOverrides {
    pub fn new(entries: Vec<PaginationOverride>) -> Self {
        Self { entries }
    }

    /// Artist names compare case-insensitively, ignoring surrounding whitespace.
    pub fn lookup(&self, artist: &str, page: usize) -> Option<&str> {
        let artist = artist.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.page == page && entry.artist.trim().to_lowercase() == artist)
            .map(|entry| entry.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let overrides = PaginationOverrides::new(vec![PaginationOverride {
            artist: "Ben UFO".to_string(),
            page: 2,
            url: "https://www.mixesdb.com/w/Category:Ben_UFO?pagefrom=2012".to_string(),
        }]);

        assert_eq!(
            overrides.lookup(" ben ufo ", 2),
            Some("https://www.mixesdb.com/w/Category:Ben_UFO?pagefrom=2012")
        );
        assert_eq!(overrides.lookup("Ben UFO", 3), None);
        assert_eq!(overrides.lookup("Joy Orbison", 2), None);
    }

    #[test]
    fn test_page_defaults_to_two() {
        let entry: PaginationOverride =
            toml::from_str("artist = \"Ben UFO\"\nurl = \"https://x/y\"").unwrap();
        assert_eq!(entry.page, 2);
    }
}
