use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::discovery::PaginationOverride;
use crate::extract::TableLayout;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Fetch settings (can override CLI/env)
    pub request_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_secs: Option<u64>,
    pub max_backoff_secs: Option<u64>,
    pub max_jitter_ms: Option<u64>,
    pub rate_limit_rpm: Option<u32>,
    pub cache_expiry_secs: Option<u64>,
    pub cache_sweep_probability: Option<f64>,
    pub user_agent: Option<String>,

    // Discovery settings
    pub base_url: Option<String>,
    pub max_pagination_pages: Option<usize>,
    pub max_explorer_items: Option<usize>,
    pub large_catalog_cap: Option<usize>,

    // Site quirks
    pub pagination_overrides: Vec<PaginationOverride>,
    pub table_layouts: Vec<TableLayout>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
