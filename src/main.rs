//! ChromaExport - Klaviyo colorimetry event exporter
//!
//! A CLI tool that pages through Klaviyo ColorimetryCompleted events,
//! flattens them into email/rgb/season sample rows, saves them as CSV,
//! and prints per-season average RGB values.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod export;
mod klaviyo;
mod models;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use export::ExportOptions;
use klaviyo::KlaviyoClient;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("ChromaExport v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the export
    if let Err(e) = run_export(args).await {
        error!("Export failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .chromaexport.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".chromaexport.toml");

    if path.exists() {
        eprintln!("⚠️  .chromaexport.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .chromaexport.toml")?;

    println!("✅ Created .chromaexport.toml with default settings.");
    println!("   Edit it to set the API key, metric, page size, and output path.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete export workflow.
async fn run_export(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration and apply CLI overrides
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    println!(
        "📥 Exporting \"{}\" events from {}",
        config.api.metric, config.api.base_url
    );

    // Step 1: Page through the events API, collecting sample rows
    let mut client = KlaviyoClient::new(&config.api)?;
    let options = ExportOptions {
        max_pages: config.api.max_pages,
        show_progress: !args.quiet,
    };
    let rows = export::collect_samples(&mut client, &options).await?;

    // Step 2: Persist the rows
    let output = Path::new(&config.export.output);
    if args.dry_run {
        println!(
            "🔍 Dry run: {} samples collected, skipping write to {}",
            rows.len(),
            output.display()
        );
    } else {
        export::write_rows(output, &rows)?;
        println!("✅ Exported {} samples to {}", rows.len(), output.display());
    }

    // Step 3: Report per-season averages
    if config.export.summary {
        let averages = analysis::season_averages(&rows);
        if averages.is_empty() {
            println!("\n🎨 No samples to summarize.");
        } else {
            println!("\n🎨 Average RGB per season:");
            println!("{}", analysis::render_summary(&averages));
        }
    }

    info!(
        "Done in {:.1}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .chromaexport.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
