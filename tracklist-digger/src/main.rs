use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tracklist_digger::config::{self, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use tracklist_digger::{DigOptions, Digger};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[clap(version, about = "Find an artist's DJ mixes and their tracklists")]
struct CliArgs {
    /// Artist name, as used on the mix database.
    pub artist: String,

    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Category listing pages to walk for this run.
    #[clap(long)]
    pub max_pages: Option<usize>,

    /// Explorer results to collect for this run. Also lifts the large-catalog cap.
    #[clap(long)]
    pub max_items: Option<usize>,

    /// Pretty-print the JSON output.
    #[clap(long)]
    pub pretty: bool,

    /// Per-request timeout in seconds.
    #[clap(long, env = "REQUEST_TIMEOUT", default_value_t = 20)]
    pub request_timeout: u64,

    /// Attempts per request, including the first one.
    #[clap(long, env = "MAX_RETRIES", default_value_t = 3)]
    pub max_retries: u32,

    /// Base retry delay in seconds, doubled on every attempt.
    #[clap(long, env = "RETRY_DELAY", default_value_t = 2)]
    pub retry_delay: u64,

    /// Default cap on explorer results.
    #[clap(long, env = "MAX_FETCH_LIMIT", default_value_t = 300)]
    pub max_fetch_limit: usize,

    /// Default cap on category listing pages.
    #[clap(long, env = "MAX_PAGINATION_PAGES", default_value_t = 10)]
    pub max_pagination_pages: usize,

    /// Outbound requests per minute. Set to 0 to disable rate limiting.
    #[clap(long, env = "RATE_LIMIT_RPM", default_value_t = 30)]
    pub rate_limit_rpm: u32,

    /// Response cache expiry in seconds. Set to 0 to disable caching.
    #[clap(long, env = "CACHE_EXPIRY", default_value_t = 86400)]
    pub cache_expiry: u64,

    /// User-Agent header for outbound requests.
    #[clap(long, env = "YOUTUBE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Root URL of the mix database.
    #[clap(long, env = "DIGGER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            request_timeout_secs: args.request_timeout,
            max_retries: args.max_retries,
            retry_delay_secs: args.retry_delay,
            rate_limit_rpm: args.rate_limit_rpm,
            cache_expiry_secs: args.cache_expiry,
            user_agent: args.user_agent.clone(),
            base_url: args.base_url.clone(),
            max_pagination_pages: args.max_pagination_pages,
            max_fetch_limit: args.max_fetch_limit,
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  base_url: {}", app_config.discovery.base_url);
    info!("  rate_limit_rpm: {}", app_config.fetch.rate_limit_rpm);
    info!("  cache_expiry_secs: {}", app_config.fetch.cache_expiry_secs);

    let digger = Digger::from_config(&app_config).context("Failed to set up the digger")?;
    let options = DigOptions {
        max_pages: cli_args.max_pages,
        max_items: cli_args.max_items,
    };
    let report = digger.dig(&cli_args.artist, options)?;

    if report.is_total_failure() {
        warn!(
            "No discovery strategy succeeded for {}; printing an empty result",
            cli_args.artist
        );
    }
    info!(
        "Summary: {}",
        serde_json::to_string(&report.stats).context("Failed to serialize stats")?
    );

    let output = if cli_args.pretty {
        serde_json::to_string_pretty(&report.mixes)
    } else {
        serde_json::to_string(&report.mixes)
    }
    .context("Failed to serialize mixes")?;
    println!("{}", output);

    Ok(())
}
