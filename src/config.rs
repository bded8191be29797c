//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.scorecard.toml` files.

use crate::analysis::HeatmapPalette;
use crate::models::MissingBaselinePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".scorecard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report discovery settings.
    #[serde(default)]
    pub input: InputSettings,

    /// Radar chart settings.
    #[serde(default)]
    pub radar: RadarConfig,

    /// Heatmap settings.
    #[serde(default)]
    pub heatmap: HeatmapConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "scorecard_report.md".to_string()
}

/// Report file discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// File extensions to include.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Maximum report files to load.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Maximum report file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            max_files: default_max_files(),
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_max_files() -> usize {
    500
}

fn default_max_file_size() -> u64 {
    1024 * 1024 // 1MB
}

/// Radar chart settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarConfig {
    /// What to do with attributes that have no team baseline.
    #[serde(default)]
    pub missing_baseline: MissingBaselinePolicy,
}

/// Heatmap settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Ten colors, band 1 (lowest) first.
    #[serde(default)]
    pub palette: HeatmapPalette,
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

    /// Try to load configuration from a directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must load. Otherwise `dir` is searched for
    /// `.scorecard.toml`; a file that exists but is invalid is an error,
    /// and defaults apply only when there is no file. Also returns the
    /// path the configuration came from, if any.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        match Self::load_from_dir(dir)? {
            Some(config) => Ok((config, Some(dir.join(CONFIG_FILE_NAME)))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(policy) = args.missing_baseline {
            self.radar.missing_baseline = policy;
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if let Some(max_files) = args.max_files {
            self.input.max_files = max_files;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "scorecard_report.md");
        assert_eq!(config.input.max_files, 500);
        assert_eq!(config.input.extensions, vec!["json"]);
        assert_eq!(config.radar.missing_baseline, MissingBaselinePolicy::Fail);
        assert_eq!(config.heatmap.palette, HeatmapPalette::default());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "squad.md"
verbose = true

[radar]
missing_baseline = "omit"

[input]
max_files = 20
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "squad.md");
        assert!(config.general.verbose);
        assert_eq!(config.radar.missing_baseline, MissingBaselinePolicy::Omit);
        assert_eq!(config.input.max_files, 20);
        assert_eq!(config.input.max_file_size, 1024 * 1024);
    }

    #[test]
    fn test_custom_palette() {
        let toml_content = r##"
[heatmap]
palette = ["#00", "#01", "#02", "#03", "#04", "#05", "#06", "#07", "#08", "#09"]
"##;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.heatmap.palette.color_for(1), "#00");
        assert_eq!(config.heatmap.palette.color_for(10), "#09");
    }

    #[test]
    fn test_short_palette_rejected() {
        let toml_content = r##"
[heatmap]
palette = ["#ff0000", "#00ff00"]
"##;

        let result: Result<Config, _> = toml::from_str(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[radar]\nmissing_baseline = \"omit\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.radar.missing_baseline, MissingBaselinePolicy::Omit);
    }

    #[test]
    fn test_invalid_default_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[heatmap]\npalette = [\"#ff0000\", \"#00ff00\", \"#0000ff\"]\n",
        )
        .unwrap();

        assert!(Config::load_from_dir(dir.path()).is_err());
        assert!(Config::resolve(None, dir.path()).is_err());
    }

    #[test]
    fn test_resolve_sources() {
        let dir = TempDir::new().unwrap();
        let (config, source) = Config::resolve(None, dir.path()).unwrap();
        assert!(source.is_none());
        assert_eq!(config.radar.missing_baseline, MissingBaselinePolicy::Fail);

        let explicit = dir.path().join("squad.toml");
        std::fs::write(&explicit, "[general]\nverbose = true\n").unwrap();
        let (config, source) = Config::resolve(Some(&explicit), dir.path()).unwrap();
        assert!(config.general.verbose);
        assert_eq!(source, Some(explicit));

        assert!(Config::resolve(Some(&dir.path().join("missing.toml")), dir.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[radar]"));
        assert!(toml_str.contains("[heatmap]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.heatmap.palette, HeatmapPalette::default());
    }
}
