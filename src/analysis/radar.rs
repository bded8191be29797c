//! Radar series construction.
//!
//! Pairs each attribute's player score with the team baseline for the same
//! attribute so a radar widget can draw both polygons on a 1-10 axis.

use crate::error::ScoreError;
use crate::models::{MissingBaselinePolicy, RadarSeries, ScoredAttribute, TeamAverage};
use std::collections::HashMap;
use tracing::debug;

/// Build a radar series, failing on the first attribute without a baseline.
#[allow(dead_code)] // Strict entry point; the report builder passes a policy
pub fn build_radar_series(
    attributes: &[ScoredAttribute],
    averages: &[TeamAverage],
) -> Result<RadarSeries, ScoreError> {
    build_radar_series_with_policy(attributes, averages, MissingBaselinePolicy::Fail)
}

/// Build a radar series, handling missing baselines according to `policy`.
///
/// Attribute order is preserved. When several averages share an attribute
/// id the first one wins.
pub fn build_radar_series_with_policy(
    attributes: &[ScoredAttribute],
    averages: &[TeamAverage],
    policy: MissingBaselinePolicy,
) -> Result<RadarSeries, ScoreError> {
    let mut baselines: HashMap<&str, f64> = HashMap::with_capacity(averages.len());
    for average in averages {
        baselines
            .entry(average.attribute_id.as_str())
            .or_insert(average.avg_score);
    }

    let mut series = RadarSeries::default();

    for attribute in attributes {
        match baselines.get(attribute.attribute_id.as_str()) {
            Some(&team_score) => {
                series.labels.push(attribute.name.clone());
                series.player.push(f64::from(attribute.score));
                series.team.push(team_score);
            }
            None => match policy {
                MissingBaselinePolicy::Fail => {
                    return Err(ScoreError::BaselineNotFound {
                        attribute_id: attribute.attribute_id.clone(),
                    });
                }
                MissingBaselinePolicy::Omit => {
                    debug!(
                        "Omitting attribute {} from radar: no team baseline",
                        attribute.attribute_id
                    );
                    series.omitted.push(attribute.attribute_id.clone());
                }
            },
        }
    }

    Ok(series)
}
