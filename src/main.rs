//! Scorecard - player attribute scorecards
//!
//! A CLI tool that reads player report exports, groups scored attributes
//! by category, compares them with team baselines and writes radar, gauge
//! and heatmap data as a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad input, missing baseline under the `fail` policy, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod input;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is resolved before logging so `[general] verbose` can apply
    let (mut config, config_source) =
        match Config::resolve(args.config.as_deref(), Path::new(".")) {
            Ok(resolved) => resolved,
            Err(e) => {
                eprintln!("\n❌ Error: {:#}", e);
                std::process::exit(1);
            }
        };
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("Scorecard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    if let Err(e) = run(args, config) {
        error!("Scorecard failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .scorecard.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the baseline policy, heatmap palette, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level(config.general.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load reports, build the scorecards and write the output file.
fn run(args: Args, config: Config) -> Result<()> {
    let input_path = args
        .input
        .clone()
        .context("An --input path is required")?;
    let loader = input::ReportLoader::new(
        input_path.clone(),
        input::InputConfig::from(&config.input),
    );

    if args.dry_run {
        return handle_dry_run(&loader);
    }

    if !args.quiet {
        println!("📥 Loading reports from: {}", input_path.display());
    }
    let reports = loader.load_all(!args.quiet)?;
    if reports.is_empty() {
        anyhow::bail!("No report files found in {}", input_path.display());
    }

    let options = report::ReportOptions {
        source: input_path.display().to_string(),
        missing_baseline: config.radar.missing_baseline,
        player: args.player.clone(),
        palette: config.heatmap.palette.clone(),
    };
    info!("Missing baseline policy: {}", options.missing_baseline);

    let score_report = report::build_score_report(&reports, &options)?;
    if let Some(ref player) = args.player {
        if score_report.players.is_empty() {
            anyhow::bail!("No report found for player: {}", player);
        }
    }

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&score_report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&score_report),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        println!("\n📊 Scorecard Summary:");
        println!("   Players: {}", score_report.metadata.players);
        println!(
            "   Attributes scored: {}",
            score_report.metadata.attributes_scored
        );
        if score_report.metadata.omitted_attributes > 0 {
            println!(
                "   Omitted (no baseline): {}",
                score_report.metadata.omitted_attributes
            );
        }
        println!("\n✅ Report saved to: {}", output_path.display());
    }

    Ok(())
}

/// Handle --dry-run: list the report files that would be loaded.
fn handle_dry_run(loader: &input::ReportLoader) -> Result<()> {
    println!("\n🔍 Dry run: discovering report files...\n");

    let files = loader.discover()?;

    if files.is_empty() {
        println!("   No matching report files found.");
    } else {
        println!("   Found {} report files:\n", files.len());
        for file in &files {
            println!("     📄 {} ({} bytes)", file.path.display(), file.size);
        }
    }

    println!("\n✅ Dry run complete. No report was written.");
    Ok(())
}
