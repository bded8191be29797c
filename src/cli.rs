//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::MissingBaselinePolicy;
use clap::Parser;
use std::path::PathBuf;

/// Scorecard - player attribute scorecards from report exports
///
/// Groups a player's scored attributes by category, compares them with
/// team baselines and renders radar, gauge and heatmap data as a
/// Markdown or JSON report.
///
/// Examples:
///   scorecard --input reports/alex.json
///   scorecard --input reports/ --format json --output squad.json
///   scorecard --input reports/ --missing-baseline omit --player p-alex
///   scorecard --input reports/ --dry-run
///   scorecard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Report file or directory of report files
    #[arg(short, long, value_name = "PATH", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting or scorecard_report.md
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(
        long,
        default_value = "markdown",
        value_name = "FORMAT",
        env = "SCORECARD_FORMAT"
    )]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .scorecard.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How to handle attributes without a team baseline
    ///
    /// fail: abort with an error naming the attribute.
    /// omit: leave the attribute out of the radar and list it in the report.
    #[arg(long, value_name = "POLICY")]
    pub missing_baseline: Option<MissingBaselinePolicy>,

    /// Only build the scorecard for this player id
    #[arg(short, long, value_name = "ID")]
    pub player: Option<String>,

    /// Maximum number of report files to load from a directory
    #[arg(long, value_name = "COUNT")]
    pub max_files: Option<usize>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: list the report files that would be loaded and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .scorecard.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
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

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.max_files == Some(0) {
            return Err("Max files must be at least 1".to_string());
        }

        if let Some(ref player) = self.player {
            if player.trim().is_empty() {
                return Err("Player id must not be empty".to_string());
            }
        }

        match self.input {
            Some(ref input) if !input.exists() => Err(format!(
                "Input path does not exist: {}",
                input.display()
            )),
            Some(_) => Ok(()),
            None => Err("An --input path is required".to_string()),
        }
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `[general] verbose` setting; `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
