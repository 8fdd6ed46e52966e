//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.chromaexport.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Klaviyo API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Export output settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Klaviyo API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Private API key. Empty by default; must be supplied via config,
    /// --api-key, or the KLAVIYO_API_KEY env var.
    #[serde(default)]
    pub key: String,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API revision header value.
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Metric name to filter events by.
    #[serde(default = "default_metric")]
    pub metric: String,

    /// Events per page (1-200).
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of pages to fetch before aborting.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: default_base_url(),
            revision: default_revision(),
            metric: default_metric(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_base_url() -> String {
    "https://a.klaviyo.com".to_string()
}

fn default_revision() -> String {
    "2024-02-15".to_string()
}

fn default_metric() -> String {
    "ColorimetryCompleted".to_string()
}

fn default_page_size() -> u64 {
    100
}

fn default_timeout() -> u64 {
    30
}

fn default_max_pages() -> usize {
    1000
}

/// Export output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output CSV file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Print the per-season average summary after exporting.
    #[serde(default = "default_true")]
    pub summary: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            summary: true,
        }
    }
}

fn default_output() -> String {
    "colorimetry_training_data.csv".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".chromaexport.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only options the user actually provided override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref key) = args.api_key {
            self.api.key = key.clone();
        }
        if let Some(ref metric) = args.metric {
            self.api.metric = metric.clone();
        }
        if let Some(ref base_url) = args.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(page_size) = args.page_size {
            self.api.page_size = page_size;
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = timeout;
        }
        if let Some(max_pages) = args.max_pages {
            self.api.max_pages = max_pages;
        }
        if let Some(ref output) = args.output {
            self.export.output = output.display().to_string();
        }
        if args.no_summary {
            self.export.summary = false;
        }
    }

    /// Validate the merged configuration before running an export.
    pub fn validate(&self) -> Result<()> {
        if self.api.key.trim().is_empty() {
            anyhow::bail!(
                "No API key configured. Set --api-key, the KLAVIYO_API_KEY env var, \
                 or [api].key in .chromaexport.toml"
            );
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
