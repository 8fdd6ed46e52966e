//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// ChromaExport - Klaviyo colorimetry event exporter
///
/// Exports ColorimetryCompleted events from Klaviyo, flattens them into
/// email/rgb/season rows, saves them as CSV, and prints per-season
/// average RGB values.
///
/// Examples:
///   chromaexport --api-key pk_...
///   chromaexport --metric ColorimetryCompleted --output samples.csv
///   chromaexport --page-size 50 --max-pages 20 --verbose
///   chromaexport --dry-run
///   chromaexport --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Klaviyo private API key
    ///
    /// Can also be set via the KLAVIYO_API_KEY env var or the [api] section
    /// of .chromaexport.toml. Required unless using --init-config.
    #[arg(
        short = 'k',
        long,
        value_name = "KEY",
        env = "KLAVIYO_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Metric name to filter events by
    ///
    /// Defaults to "ColorimetryCompleted" (config: [api].metric).
    #[arg(short, long, value_name = "NAME")]
    pub metric: Option<String>,

    /// Output CSV file path
    ///
    /// Defaults to "colorimetry_training_data.csv" (config: [export].output).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Events per page (1-200)
    ///
    /// Klaviyo caps page[size] at 200.
    #[arg(long, value_name = "COUNT")]
    pub page_size: Option<u64>,

    /// Maximum number of pages to fetch before aborting
    ///
    /// Safety cap against a server that never stops returning next links.
    #[arg(long, value_name = "COUNT")]
    pub max_pages: Option<usize>,

    /// Klaviyo API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .chromaexport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fetch and summarize without writing the CSV
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the per-season average summary
    #[arg(long)]
    pub no_summary: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .chromaexport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate base URL format if provided
        if let Some(ref base_url) = self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err("Base URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate page size range (Klaviyo rejects anything above 200)
        if let Some(page_size) = self.page_size {
            if page_size == 0 || page_size > 200 {
                return Err("Page size must be between 1 and 200".to_string());
            }
        }

        // Validate safety cap
        if let Some(max_pages) = self.max_pages {
            if max_pages == 0 {
                return Err("Max pages must be at least 1".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
