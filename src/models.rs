//! Data models for the scorecard tool.
//!
//! Input rows (scored attributes and team averages) arrive from the report
//! and team-progress services in camelCase JSON; the output structures here
//! are what chart widgets consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest score an attribute can be given.
pub const SCORE_MIN: u8 = 1;

/// Highest score an attribute can be given.
pub const SCORE_MAX: u8 = 10;

/// One player's score for one attribute within a single report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAttribute {
    /// Identifier of the attribute being scored.
    pub attribute_id: String,
    /// Display name of the attribute.
    pub name: String,
    /// Category label, case preserved.
    pub category: String,
    /// Score between 1 and 10.
    pub score: u8,
}

impl ScoredAttribute {
    /// Returns true if the score lies within 1..=10.
    pub fn in_range(&self) -> bool {
        (SCORE_MIN..=SCORE_MAX).contains(&self.score)
    }
}

/// Team-wide mean score for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAverage {
    pub attribute_id: String,
    pub category: String,
    pub avg_score: f64,
}

/// Attributes of one category, in the order they were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub category: String,
    pub attributes: Vec<ScoredAttribute>,
}

/// Ordered mapping from category to its attributes.
///
/// Categories keep first-seen order; attributes keep insertion order within
/// their category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub entries: Vec<CategoryEntry>,
}

impl CategoryGroup {
    /// Category names in group order.
    #[allow(dead_code)] // Only used by tests
    pub fn categories(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.category.as_str()).collect()
    }

    /// Attributes for a category, if present.
    #[allow(dead_code)] // Only used by tests
    pub fn get(&self, category: &str) -> Option<&[ScoredAttribute]> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.attributes.as_slice())
    }

    /// Total number of attributes across all categories.
    pub fn attribute_count(&self) -> usize {
        self.entries.iter().map(|e| e.attributes.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.iter()
    }
}

/// Fixed radar axis: 1 to 10 with integer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for RadarScale {
    fn default() -> Self {
        Self {
            min: SCORE_MIN as f64,
            max: SCORE_MAX as f64,
            step: 1.0,
        }
    }
}

/// Parallel series for a radar chart comparing a player to the team.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarSeries {
    /// Attribute names, one per point.
    pub labels: Vec<String>,
    /// Player scores, same length as `labels`.
    pub player: Vec<f64>,
    /// Team averages, same length as `labels`.
    pub team: Vec<f64>,
    /// Attribute ids left out because no team baseline exists.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<String>,
    pub scale: RadarScale,
}

impl RadarSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// What to do when an attribute has no team baseline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MissingBaselinePolicy {
    /// Abort the radar build with a missing-baseline error.
    #[default]
    Fail,
    /// Leave the attribute out of the radar and record its id.
    Omit,
}

impl fmt::Display for MissingBaselinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingBaselinePolicy::Fail => write!(f, "fail"),
            MissingBaselinePolicy::Omit => write!(f, "omit"),
        }
    }
}

/// Qualitative band of a gauge score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeBand {
    /// Score of 5 or less
    Low,
    /// Score above 5 and below 7
    Mid,
    /// Score of 7 or more
    High,
}

impl fmt::Display for GaugeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaugeBand::Low => write!(f, "Low"),
            GaugeBand::Mid => write!(f, "Mid"),
            GaugeBand::High => write!(f, "High"),
        }
    }
}

impl GaugeBand {
    /// Returns an emoji representation of the band.
    pub fn emoji(&self) -> &'static str {
        match self {
            GaugeBand::Low => "🔴",
            GaugeBand::Mid => "🟠",
            GaugeBand::High => "🟢",
        }
    }
}

/// Two-segment doughnut gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gauge {
    pub filled_value: f64,
    /// `None` when the gauge is completely filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remainder_value: Option<f64>,
    pub color_band: GaugeBand,
}

impl Gauge {
    /// Number of segments the widget draws.
    #[allow(dead_code)] // Helper for tests; not part of the serialized gauge
    pub fn segments(&self) -> usize {
        if self.remainder_value.is_some() {
            2
        } else {
            1
        }
    }
}

/// One cell of the team heatmap grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub attribute_name: String,
    pub avg_score: f64,
    /// 1 (reddest) to 10 (greenest).
    pub color_band: u8,
    pub color: String,
}

/// Identity of the player a report belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PlayerInfo {
    /// Name if known, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A single player report as delivered by the report service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub player: PlayerInfo,
    pub attributes: Vec<ScoredAttribute>,
    /// Pre-aggregated baselines; empty when the team-progress service
    /// supplied none.
    #[serde(default)]
    pub team_averages: Vec<TeamAverage>,
}

/// Per-category section of a player scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScorecard {
    pub category: String,
    /// Mean player score in this category.
    pub average: f64,
    pub gauge: Gauge,
    pub radar: RadarSeries,
}

/// Everything rendered for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScorecard {
    pub player: PlayerInfo,
    /// Gauge of the mean over all attributes; absent for an empty report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<Gauge>,
    pub categories: Vec<CategoryScorecard>,
    pub strengths: Vec<ScoredAttribute>,
    pub development_areas: Vec<ScoredAttribute>,
}

impl PlayerScorecard {
    /// Attribute ids omitted from any radar for lack of a baseline.
    pub fn omitted_attributes(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.radar.omitted.iter().map(String::as_str))
            .collect()
    }
}

/// Metadata about the scorecard report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Input file or directory the reports were read from.
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub players: usize,
    pub attributes_scored: usize,
    pub missing_baseline_policy: MissingBaselinePolicy,
    /// True when baselines were averaged from the loaded reports.
    pub computed_baselines: bool,
    pub omitted_attributes: usize,
}

/// The complete scorecard report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub metadata: ReportMetadata,
    pub players: Vec<PlayerScorecard>,
    pub team_heatmap: Vec<HeatmapCell>,
}
