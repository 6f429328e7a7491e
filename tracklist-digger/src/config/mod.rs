mod file_config;

pub use file_config::FileConfig;

use crate::discovery::PaginationOverride;
use crate::extract::TableLayout;
use anyhow::{bail, Result};
use reqwest::Url;
use scraper::Selector;

pub const DEFAULT_BASE_URL: &str = "https://www.mixesdb.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; tracklist-digger/0.1)";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI/env options that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    pub rate_limit_rpm: u32,
    pub cache_expiry_secs: u64,
    pub user_agent: String,
    pub base_url: String,
    pub max_pagination_pages: usize,
    pub max_fetch_limit: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let discovery = DiscoverySettings::default();
        Self {
            request_timeout_secs: fetch.request_timeout_secs,
            max_retries: fetch.max_retries,
            retry_delay_secs: fetch.retry_delay_secs,
            rate_limit_rpm: fetch.rate_limit_rpm,
            cache_expiry_secs: fetch.cache_expiry_secs,
            user_agent: fetch.user_agent,
            base_url: discovery.base_url,
            max_pagination_pages: discovery.max_pagination_pages,
            max_fetch_limit: discovery.max_explorer_items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub discovery: DiscoverySettings,
}

/// Settings for the HTTP fetch layer.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout_secs: u64,
    /// Total attempts per request, including the first one.
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    pub max_backoff_secs: u64,
    pub max_jitter_ms: u64,
    /// `0` disables rate limiting.
    pub rate_limit_rpm: u32,
    /// `0` disables the response cache.
    pub cache_expiry_secs: u64,
    pub cache_sweep_probability: f64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 20,
            max_retries: 3,
            retry_delay_secs: 2,
            max_backoff_secs: 60,
            max_jitter_ms: 1000,
            rate_limit_rpm: 30,
            cache_expiry_secs: 86400, // 24 hours
            cache_sweep_probability: 0.05,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings for the two discovery strategies.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    pub base_url: String,
    pub max_pagination_pages: usize,
    pub max_explorer_items: usize,
    /// Catalogs larger than this are capped here unless the caller
    /// explicitly asks for more items.
    pub large_catalog_cap: usize,
    pub pagination_overrides: Vec<PaginationOverride>,
    pub table_layouts: Vec<TableLayout>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pagination_pages: 10,
            max_explorer_items: 300,
            large_catalog_cap: 200,
            pagination_overrides: Vec::new(),
            table_layouts: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI/env arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let fetch_defaults = FetchSettings::default();
        let discovery_defaults = DiscoverySettings::default();

        let user_agent = file.user_agent.unwrap_or_else(|| cli.user_agent.clone());
        if user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        let cache_sweep_probability = file
            .cache_sweep_probability
            .unwrap_or(fetch_defaults.cache_sweep_probability);
        if !(0.0..=1.0).contains(&cache_sweep_probability) {
            bail!(
                "cache_sweep_probability must be within [0, 1], got {}",
                cache_sweep_probability
            );
        }

        let fetch = FetchSettings {
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(cli.request_timeout_secs),
            max_retries: file.max_retries.unwrap_or(cli.max_retries),
            retry_delay_secs: file.retry_delay_secs.unwrap_or(cli.retry_delay_secs),
            max_backoff_secs: file
                .max_backoff_secs
                .unwrap_or(fetch_defaults.max_backoff_secs),
            max_jitter_ms: file.max_jitter_ms.unwrap_or(fetch_defaults.max_jitter_ms),
            rate_limit_rpm: file.rate_limit_rpm.unwrap_or(cli.rate_limit_rpm),
            cache_expiry_secs: file.cache_expiry_secs.unwrap_or(cli.cache_expiry_secs),
            cache_sweep_probability,
            user_agent,
        };

        let base_url = file.base_url.unwrap_or_else(|| cli.base_url.clone());
        validate_base_url(&base_url)?;

        for layout in &file.table_layouts {
            if layout.url_pattern.trim().is_empty() {
                bail!("table_layouts entries need a non-empty url_pattern");
            }
            if Selector::parse(&layout.table_selector).is_err() {
                bail!(
                    "Invalid table_selector {:?} for url_pattern {:?}",
                    layout.table_selector,
                    layout.url_pattern
                );
            }
        }

        for entry in &file.pagination_overrides {
            if entry.page < 2 {
                bail!(
                    "pagination override for {:?} must target page 2 or later",
                    entry.artist
                );
            }
            if Url::parse(&entry.url).is_err() {
                bail!(
                    "pagination override for {:?} has an invalid url: {}",
                    entry.artist,
                    entry.url
                );
            }
        }

        let discovery = DiscoverySettings {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_pagination_pages: file
                .max_pagination_pages
                .unwrap_or(cli.max_pagination_pages),
            max_explorer_items: file.max_explorer_items.unwrap_or(cli.max_fetch_limit),
            large_catalog_cap: file
                .large_catalog_cap
                .unwrap_or(discovery_defaults.large_catalog_cap),
            pagination_overrides: file.pagination_overrides,
            table_layouts: file.table_layouts,
        };

        Ok(Self { fetch, discovery })
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    match Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        Ok(_) => bail!("base_url must be an absolute http(s) URL: {}", base_url),
        Err(e) => bail!("Invalid base_url {:?}: {}", base_url, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            request_timeout_secs: 10,
            max_retries: 5,
            retry_delay_secs: 1,
            rate_limit_rpm: 60,
            cache_expiry_secs: 600,
            user_agent: "digger-test".to_string(),
            base_url: "https://mirror.example.org/".to_string(),
            max_pagination_pages: 4,
            max_fetch_limit: 100,
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.fetch.request_timeout_secs, 10);
        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.fetch.retry_delay_secs, 1);
        assert_eq!(config.fetch.rate_limit_rpm, 60);
        assert_eq!(config.fetch.cache_expiry_secs, 600);
        assert_eq!(config.fetch.user_agent, "digger-test");
        // Trailing slash trimmed
        assert_eq!(config.discovery.base_url, "https://mirror.example.org");
        assert_eq!(config.discovery.max_pagination_pages, 4);
        assert_eq!(config.discovery.max_explorer_items, 100);
        // Not exposed on the CLI: defaults
        assert_eq!(config.fetch.max_backoff_secs, 60);
        assert_eq!(config.discovery.large_catalog_cap, 200);
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();

        assert_eq!(config.fetch.request_timeout_secs, 20);
        assert_eq!(config.fetch.max_retries, 3);
        assert_eq!(config.fetch.retry_delay_secs, 2);
        assert_eq!(config.fetch.rate_limit_rpm, 30);
        assert_eq!(config.fetch.cache_expiry_secs, 86400);
        assert_eq!(config.discovery.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.discovery.max_pagination_pages, 10);
        assert_eq!(config.discovery.max_explorer_items, 300);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let cli = CliConfig {
            rate_limit_rpm: 30,
            max_pagination_pages: 10,
            ..Default::default()
        };

        let file_config = FileConfig {
            rate_limit_rpm: Some(6),
            max_backoff_secs: Some(10),
            base_url: Some("http://localhost:8080".to_string()),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.fetch.rate_limit_rpm, 6);
        assert_eq!(config.fetch.max_backoff_secs, 10);
        assert_eq!(config.discovery.base_url, "http://localhost:8080");
        // CLI value used when TOML doesn't specify
        assert_eq!(config.discovery.max_pagination_pages, 10);
    }

    #[test]
    fn test_resolve_invalid_base_url_error() {
        let cli = CliConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid base_url"));

        let cli = CliConfig {
            base_url: "ftp://mixes.example.org".to_string(),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_resolve_empty_user_agent_error() {
        let cli = CliConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("user_agent"));
    }

    #[test]
    fn test_resolve_invalid_table_selector_error() {
        let file_config = FileConfig {
            table_layouts: vec![TableLayout {
                url_pattern: "Some_Artist".to_string(),
                table_selector: "table[[".to_string(),
                track_column: 1,
                header_rows: 1,
            }],
            ..Default::default()
        };
        let result = AppConfig::resolve(&CliConfig::default(), Some(file_config));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid table_selector"));
    }

    #[test]
    fn test_resolve_pagination_override_validation() {
        let file_config = FileConfig {
            pagination_overrides: vec![PaginationOverride {
                artist: "Ben UFO".to_string(),
                page: 1,
                url: "https://www.mixesdb.com/w/Category:Ben_UFO".to_string(),
            }],
            ..Default::default()
        };
        assert!(AppConfig::resolve(&CliConfig::default(), Some(file_config)).is_err());

        let file_config = FileConfig {
            pagination_overrides: vec![PaginationOverride {
                artist: "Ben UFO".to_string(),
                page: 2,
                url: "https://www.mixesdb.com/w/Category:Ben_UFO?pagefrom=2012".to_string(),
            }],
            ..Default::default()
        };
        let config = AppConfig::resolve(&CliConfig::default(), Some(file_config)).unwrap();
        assert_eq!(config.discovery.pagination_overrides.len(), 1);
    }

    #[test]
    fn test_resolve_sweep_probability_bounds() {
        let file_config = FileConfig {
            cache_sweep_probability: Some(1.5),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&CliConfig::default(), Some(file_config)).is_err());
    }
}
