//! Report file discovery and loading.
//!
//! The input path is either a single report file or a directory holding one
//! JSON report per player. Directories are walked with the configured
//! extension, size and count limits.

use crate::models::PlayerReport;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for report discovery.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// File extensions to include (e.g., ["json"])
    pub extensions: Vec<String>,
    /// Maximum file size in bytes
    pub max_file_size: u64,
    /// Maximum number of files to load
    pub max_files: Option<usize>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["json".to_string()],
            max_file_size: 1024 * 1024, // 1MB
            max_files: None,
        }
    }
}

impl From<&crate::config::InputSettings> for InputConfig {
    fn from(config: &crate::config::InputSettings) -> Self {
        Self {
            extensions: config.extensions.clone(),
            max_file_size: config.max_file_size,
            max_files: Some(config.max_files),
        }
    }
}

/// A report file found on disk.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Finds and parses player report files.
pub struct ReportLoader {
    config: InputConfig,
    root: PathBuf,
}

impl ReportLoader {
    /// Create a new loader rooted at a file or directory.
    pub fn new(root: PathBuf, config: InputConfig) -> Self {
        Self { config, root }
    }

    /// Find all report files, sorted by path.
    ///
    /// A file root is returned as-is regardless of extension.
    pub fn discover(&self) -> Result<Vec<ReportFile>> {
        if self.root.is_file() {
            let metadata = fs::metadata(&self.root)
                .with_context(|| format!("Failed to stat {}", self.root.display()))?;
            return Ok(vec![ReportFile {
                path: self.root.clone(),
                size: metadata.len(),
            }]);
        }

        if !self.root.is_dir() {
            return Err(anyhow::anyhow!(
                "Input path not found: {}",
                self.root.display()
            ));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            if let Some(max) = self.config.max_files {
                if files.len() >= max {
                    debug!("Reached max_files limit of {}", max);
                    break;
                }
            }

            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.matches(entry.path()) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(m) => m.len(),
                Err(e) => {
                    debug!("Cannot read metadata for {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            if size > self.config.max_file_size {
                warn!(
                    "Skipping {} ({} bytes exceeds limit of {})",
                    entry.path().display(),
                    size,
                    self.config.max_file_size
                );
                continue;
            }

            files.push(ReportFile {
                path: entry.path().to_path_buf(),
                size,
            });
        }

        Ok(files)
    }

    /// Discover and parse every report.
    pub fn load_all(&self, show_progress: bool) -> Result<Vec<PlayerReport>> {
        let files = self.discover()?;
        info!("Found {} report file(s) under {}", files.len(), self.root.display());

        let progress_bar = if show_progress && files.len() > 1 {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            reports.push(load_report(&file.path)?);
            if let Some(ref pb) = progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Reports loaded");
        }

        Ok(reports)
    }

    /// Check if a file has one of the configured extensions.
    fn matches(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.config
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Parse a single player report file.
///
/// Scores outside 1-10 are kept and logged; the colorizers clamp them.
pub fn load_report(path: &Path) -> Result<PlayerReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;

    let report: PlayerReport = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse report: {}", path.display()))?;

    for attribute in report.attributes.iter().filter(|a| !a.in_range()) {
        warn!(
            "{}: attribute {} has out-of-range score {}",
            path.display(),
            attribute.attribute_id,
            attribute.score
        );
    }

    debug!(
        "Loaded report for {} ({} attributes, {} baselines)",
        report.player.id,
        report.attributes.len(),
        report.team_averages.len()
    );

    Ok(report)
}
