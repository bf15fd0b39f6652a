//! Configuration management with TOML, environment variables, and CLI overrides.
//!
//! Every empirically tuned harvest threshold is an explicit `[harvest]`
//! field rather than a constant buried in the loop.

use crate::analysis::Metric;
use crate::ownership::sports::{Sport, DEFAULT_BASE_URL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Sport whose ownership table to harvest
    #[serde(default)]
    pub sport: Sport,

    /// Site the ownership pages live on (overridable for testing)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Metric used for the top-N ranking
    #[serde(default)]
    pub metric: Metric,

    /// Number of rows in the top-N ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Directory the CSV artifact is written to
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// How long a harvested result stays reusable
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Harvest loop tuning
    #[serde(default)]
    pub harvest: HarvestConfig,
}

/// Tunables of the incremental-scroll loop. Defaults are the empirically
/// tuned values for the target site; none of them are assumed to generalize
/// to other virtualized lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Upper bound on waiting for the table container to appear
    #[serde(default = "default_container_timeout_secs")]
    pub container_timeout_secs: u64,

    /// Settle interval after each incremental scroll
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Settle interval after a catch-up or bottom-jump scroll
    #[serde(default = "default_catchup_settle_ms")]
    pub catchup_settle_ms: u64,

    /// Pixels added to the scroll offset per iteration
    #[serde(default = "default_scroll_increment_px")]
    pub scroll_increment_px: i64,

    /// Pixels added by the stall-recovery catch-up scroll
    #[serde(default = "default_catchup_scroll_px")]
    pub catchup_scroll_px: i64,

    /// Consecutive no-new-player scrolls before stall recovery kicks in
    #[serde(default = "default_stall_threshold")]
    pub stall_threshold: u32,

    /// Hard bound on scroll iterations per harvest
    #[serde(default = "default_max_scrolls")]
    pub max_scrolls: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_top_n() -> usize {
    10
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_container_timeout_secs() -> u64 {
    20
}

fn default_settle_ms() -> u64 {
    2000
}

fn default_catchup_settle_ms() -> u64 {
    3000
}

fn default_scroll_increment_px() -> i64 {
    300
}

fn default_catchup_scroll_px() -> i64 {
    1000
}

fn default_stall_threshold() -> u32 {
    5
}

fn default_max_scrolls() -> u32 {
    100
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            container_timeout_secs: default_container_timeout_secs(),
            settle_ms: default_settle_ms(),
            catchup_settle_ms: default_catchup_settle_ms(),
            scroll_increment_px: default_scroll_increment_px(),
            catchup_scroll_px: default_catchup_scroll_px(),
            stall_threshold: default_stall_threshold(),
            max_scrolls: default_max_scrolls(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sport: Sport::Mlb,
            base_url: default_base_url(),
            format: OutputFormat::Table,
            metric: Metric::Combined,
            top_n: default_top_n(),
            artifact_dir: default_artifact_dir(),
            cache_ttl_secs: default_cache_ttl_secs(),
            harvest: HarvestConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("dfs-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(sport) = std::env::var("DFS_SPORT") {
            if let Ok(s) = sport.parse() {
                self.sport = s;
            }
        }

        if let Ok(base_url) = std::env::var("DFS_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(settle) = std::env::var("DFS_SETTLE_MS") {
            if let Ok(ms) = settle.parse() {
                self.harvest.settle_ms = ms;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
