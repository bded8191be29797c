//! Scorecard assembly.
//!
//! Turns loaded player reports into a `ScoreReport`: one scorecard per
//! player plus a team heatmap over the baselines that were used.

use crate::analysis::{
    build_radar_series_with_policy, category_averages, colorize_score, group_by_category,
    heatmap_cells, mean_score, strongest_attributes, team_averages, weakest_attributes,
    HeatmapPalette,
};
use crate::error::ScoreError;
use crate::models::{
    CategoryScorecard, MissingBaselinePolicy, PlayerReport, PlayerScorecard, ReportMetadata,
    ScoreReport, ScoredAttribute, TeamAverage,
};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Number of attributes listed as strengths and as development areas.
const HIGHLIGHT_COUNT: usize = 3;

/// Options controlling scorecard assembly.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Input file or directory, recorded in the metadata.
    pub source: String,
    pub missing_baseline: MissingBaselinePolicy,
    /// Restrict output to one player id.
    pub player: Option<String>,
    pub palette: HeatmapPalette,
}

/// Build the scorecard report for a batch of player reports.
///
/// Reports without their own team averages use baselines averaged over the
/// whole batch, provided the batch holds more than one report.
pub fn build_score_report(
    reports: &[PlayerReport],
    options: &ReportOptions,
) -> Result<ScoreReport, ScoreError> {
    let needs_baselines = reports.iter().any(|r| r.team_averages.is_empty());
    let computed = if needs_baselines && reports.len() > 1 {
        let rows: Vec<ScoredAttribute> = reports
            .iter()
            .flat_map(|r| r.attributes.iter().cloned())
            .collect();
        let averages = team_averages(&rows);
        info!(
            "Computed {} team baselines from {} reports",
            averages.len(),
            reports.len()
        );
        averages
    } else {
        Vec::new()
    };

    let selected: Vec<&PlayerReport> = reports
        .iter()
        .filter(|r| match options.player {
            Some(ref id) => &r.player.id == id,
            None => true,
        })
        .collect();

    let mut players = Vec::with_capacity(selected.len());
    let mut used_baselines: Vec<TeamAverage> = Vec::new();
    let mut seen_baselines: HashSet<String> = HashSet::new();
    let mut computed_used = false;

    for report in &selected {
        let baselines = if report.team_averages.is_empty() {
            computed_used |= !computed.is_empty();
            &computed
        } else {
            &report.team_averages
        };

        players.push(build_player_scorecard(
            report,
            baselines,
            options.missing_baseline,
        )?);

        for baseline in baselines {
            if seen_baselines.insert(baseline.attribute_id.clone()) {
                used_baselines.push(baseline.clone());
            }
        }
    }

    let all_attributes: Vec<ScoredAttribute> = selected
        .iter()
        .flat_map(|r| r.attributes.iter().cloned())
        .collect();
    let team_heatmap = heatmap_cells(&used_baselines, &all_attributes, &options.palette);

    let omitted_attributes = players
        .iter()
        .map(|p| p.omitted_attributes().len())
        .sum();
    if omitted_attributes > 0 {
        warn!(
            "{} attribute(s) omitted from radar charts for lack of a team baseline",
            omitted_attributes
        );
    }

    let metadata = ReportMetadata {
        source: options.source.clone(),
        generated_at: Utc::now(),
        players: players.len(),
        attributes_scored: all_attributes.len(),
        missing_baseline_policy: options.missing_baseline,
        computed_baselines: computed_used,
        omitted_attributes,
    };

    Ok(ScoreReport {
        metadata,
        players,
        team_heatmap,
    })
}

/// Build one player's scorecard against the given baselines.
pub fn build_player_scorecard(
    report: &PlayerReport,
    baselines: &[TeamAverage],
    policy: MissingBaselinePolicy,
) -> Result<PlayerScorecard, ScoreError> {
    let grouped = group_by_category(&report.attributes);
    debug!(
        "Player {}: {} attributes in {} categories",
        report.player.id,
        grouped.attribute_count(),
        grouped.len()
    );

    let averages = category_averages(&grouped);

    let mut categories = Vec::with_capacity(grouped.len());
    for (entry, (_, average)) in grouped.iter().zip(averages) {
        let radar = build_radar_series_with_policy(&entry.attributes, baselines, policy)?;

        categories.push(CategoryScorecard {
            category: entry.category.clone(),
            average,
            gauge: colorize_score(average),
            radar,
        });
    }

    Ok(PlayerScorecard {
        player: report.player.clone(),
        overall: mean_score(&report.attributes).map(colorize_score),
        categories,
        strengths: strongest_attributes(&report.attributes, HIGHLIGHT_COUNT),
        development_areas: weakest_attributes(&report.attributes, HIGHLIGHT_COUNT),
    })
}
