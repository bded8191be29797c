//! Heatmap color banding for team averages.
//!
//! Averages are clamped to `[0, 10]`, rounded to the nearest integer and
//! raised to at least 1 before indexing the ten-color palette, so a value
//! that rounds to 0 lands in band 1 instead of before the table.

use crate::error::ScoreError;
use crate::models::{HeatmapCell, ScoredAttribute, TeamAverage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of color bands in a heatmap palette.
pub const HEATMAP_BANDS: usize = 10;

/// Red to green, band 1 first.
pub const DEFAULT_PALETTE: [&str; HEATMAP_BANDS] = [
    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#d9ef8b", "#a6d96a", "#66bd63",
    "#1a9850", "#006837",
];

/// Map a raw average to a band in `1..=10`.
pub fn heatmap_band(avg_score: f64) -> u8 {
    if avg_score.is_nan() {
        return 1;
    }

    let rounded = avg_score.clamp(0.0, HEATMAP_BANDS as f64).round() as u8;
    rounded.max(1)
}

/// Ten ordered heatmap colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HeatmapPalette {
    colors: Vec<String>,
}

impl HeatmapPalette {
    /// Create a palette, rejecting anything but exactly ten colors.
    pub fn new(colors: Vec<String>) -> Result<Self, ScoreError> {
        if colors.len() != HEATMAP_BANDS {
            return Err(ScoreError::InvalidPalette {
                found: colors.len(),
                expected: HEATMAP_BANDS,
            });
        }
        Ok(Self { colors })
    }

    /// Color for a band; out-of-range bands are clamped.
    pub fn color_for(&self, band: u8) -> &str {
        let index = usize::from(band).clamp(1, HEATMAP_BANDS) - 1;
        &self.colors[index]
    }
}

impl Default for HeatmapPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for HeatmapPalette {
    type Error = ScoreError;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<HeatmapPalette> for Vec<String> {
    fn from(palette: HeatmapPalette) -> Self {
        palette.colors
    }
}

/// Build one heatmap cell per team average, in input order.
///
/// Names are resolved from `attributes` by id (first match); unknown ids
/// are shown as the id itself.
pub fn heatmap_cells(
    averages: &[TeamAverage],
    attributes: &[ScoredAttribute],
    palette: &HeatmapPalette,
) -> Vec<HeatmapCell> {
    let mut names: HashMap<&str, &str> = HashMap::new();
    for attribute in attributes {
        names
            .entry(attribute.attribute_id.as_str())
            .or_insert(attribute.name.as_str());
    }

    averages
        .iter()
        .map(|average| {
            let band = heatmap_band(average.avg_score);
            let name = names
                .get(average.attribute_id.as_str())
                .copied()
                .unwrap_or(average.attribute_id.as_str());

            HeatmapCell {
                attribute_name: name.to_string(),
                avg_score: average.avg_score,
                color_band: band,
                color: palette.color_for(band).to_string(),
            }
        })
        .collect()
}
