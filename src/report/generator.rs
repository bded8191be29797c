//! Markdown and JSON report generation.
//!
//! This module renders a `ScoreReport` for humans (Markdown tables) or for
//! chart widgets (JSON).

use crate::models::{
    CategoryScorecard, Gauge, HeatmapCell, PlayerScorecard, ReportMetadata, ScoreReport,
    ScoredAttribute,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &ScoreReport) -> String {
    let mut output = String::new();

    output.push_str("# Scorecard Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report));

    for player in &report.players {
        output.push_str(&generate_player_section(player));
    }

    output.push_str(&generate_heatmap_section(&report.team_heatmap));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Players:** {}\n", metadata.players));
    section.push_str(&format!(
        "- **Attributes Scored:** {}\n",
        metadata.attributes_scored
    ));
    section.push_str(&format!(
        "- **Missing Baseline Policy:** `{}`\n",
        metadata.missing_baseline_policy
    ));
    if metadata.computed_baselines {
        section.push_str("- **Baselines:** averaged from the loaded reports\n");
    }
    if metadata.omitted_attributes > 0 {
        section.push_str(&format!(
            "- **Omitted Attributes:** {}\n",
            metadata.omitted_attributes
        ));
    }
    section.push('\n');

    section
}

/// Escape text placed inside a Markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn anchor(text: &str) -> String {
    text.replace(['/', '.', ' '], "-").to_lowercase()
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &ScoreReport) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");

    for player in &report.players {
        toc.push_str(&format!(
            "- [{}](#{})\n",
            player.player.display_name(),
            anchor(&player.player.id)
        ));
    }

    if !report.team_heatmap.is_empty() {
        toc.push_str("- [Team Heatmap](#team-heatmap)\n");
    }

    toc.push('\n');

    toc
}

fn format_gauge(gauge: &Gauge) -> String {
    format!(
        "{} {:.1} / 10 ({})",
        gauge.color_band.emoji(),
        gauge.filled_value,
        gauge.color_band
    )
}

/// Generate the section for a single player.
fn generate_player_section(player: &PlayerScorecard) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "## {} {{#{}}}\n\n",
        player.player.display_name(),
        anchor(&player.player.id)
    ));

    match player.overall {
        Some(ref overall) => {
            section.push_str(&format!("*Overall: {}*\n\n", format_gauge(overall)));
        }
        None => {
            section.push_str("*No attributes scored in this report.*\n\n");
            return section;
        }
    }

    section.push_str("### Category Overview\n\n");
    section.push_str("| Category | Average | Band | Attributes |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");
    for category in &player.categories {
        section.push_str(&format!(
            "| {} | {:.1} | {} {} | {} |\n",
            escape_cell(&category.category),
            category.average,
            category.gauge.color_band.emoji(),
            category.gauge.color_band,
            category.radar.len() + category.radar.omitted.len()
        ));
    }
    section.push('\n');

    for category in &player.categories {
        section.push_str(&generate_category_block(category));
    }

    section.push_str(&generate_highlights("Strengths", &player.strengths));
    section.push_str(&generate_highlights(
        "Development Areas",
        &player.development_areas,
    ));

    section
}

/// Generate the radar comparison table for one category.
fn generate_category_block(category: &CategoryScorecard) -> String {
    let mut block = String::new();

    block.push_str(&format!("### {}\n\n", category.category));

    let radar = &category.radar;
    if !radar.is_empty() {
        block.push_str("| Attribute | Player | Team | Difference |\n");
        block.push_str("|:---|:---:|:---:|:---:|\n");

        for ((label, player), team) in radar.labels.iter().zip(&radar.player).zip(&radar.team) {
            block.push_str(&format!(
                "| {} | {:.0} | {:.1} | {:+.1} |\n",
                escape_cell(label),
                player,
                team,
                player - team
            ));
        }
        block.push('\n');
    }

    if !radar.omitted.is_empty() {
        block.push_str(&format!(
            "> ⚠️ **No team baseline:** {}\n\n",
            radar.omitted.join(", ")
        ));
    }

    block
}

fn generate_highlights(title: &str, attributes: &[ScoredAttribute]) -> String {
    if attributes.is_empty() {
        return String::new();
    }

    let mut section = format!("### {}\n\n", title);
    for attribute in attributes {
        section.push_str(&format!(
            "- **{}** ({}): {}\n",
            attribute.name, attribute.category, attribute.score
        ));
    }
    section.push('\n');

    section
}

/// Generate the team heatmap section.
fn generate_heatmap_section(cells: &[HeatmapCell]) -> String {
    if cells.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Team Heatmap\n\n");
    section.push_str("| Attribute | Team Average | Band | Color |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");
    for cell in cells {
        section.push_str(&format!(
            "| {} | {:.2} | {} | `{}` |\n",
            escape_cell(&cell.attribute_name),
            cell.avg_score,
            cell.color_band,
            cell.color
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by scorecard*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &ScoreReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{colorize_score, HeatmapPalette};
    use crate::models::{MissingBaselinePolicy, PlayerInfo, RadarSeries};
    use chrono::Utc;

    fn create_test_report() -> ScoreReport {
        let metadata = ReportMetadata {
            source: "reports/".to_string(),
            generated_at: Utc::now(),
            players: 1,
            attributes_scored: 3,
            missing_baseline_policy: MissingBaselinePolicy::Omit,
            computed_baselines: true,
            omitted_attributes: 1,
        };

        let passing = ScoredAttribute {
            attribute_id: "pass".to_string(),
            name: "Passing".to_string(),
            category: "Technical".to_string(),
            score: 8,
        };

        ScoreReport {
            metadata,
            players: vec![PlayerScorecard {
                player: PlayerInfo {
                    id: "p-alex".to_string(),
                    name: Some("Alex Moreno".to_string()),
                },
                overall: Some(colorize_score(7.0)),
                categories: vec![CategoryScorecard {
                    category: "Technical".to_string(),
                    average: 7.0,
                    gauge: colorize_score(7.0),
                    radar: RadarSeries {
                        labels: vec!["Passing".to_string(), "First Touch".to_string()],
                        player: vec![8.0, 6.0],
                        team: vec![6.5, 7.0],
                        omitted: vec!["vision".to_string()],
                        ..RadarSeries::default()
                    },
                }],
                strengths: vec![passing.clone()],
                development_areas: vec![passing],
            }],
            team_heatmap: vec![HeatmapCell {
                attribute_name: "Passing".to_string(),
                avg_score: 6.5,
                color_band: 7,
                color: HeatmapPalette::default().color_for(7).to_string(),
            }],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Scorecard Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Alex Moreno {#p-alex}"));
        assert!(markdown.contains("### Category Overview"));
        assert!(markdown.contains("| Passing | 8 | 6.5 | +1.5 |"));
        assert!(markdown.contains("| First Touch | 6 | 7.0 | -1.0 |"));
        assert!(markdown.contains("No team baseline:** vision"));
        assert!(markdown.contains("## Team Heatmap"));
        assert!(markdown.contains("`#a6d96a`"));
    }

    #[test]
    fn test_generate_metadata_section() {
        let report = create_test_report();
        let section = generate_metadata_section(&report.metadata);

        assert!(section.contains("`reports/`"));
        assert!(section.contains("`omit`"));
        assert!(section.contains("averaged from the loaded reports"));
        assert!(section.contains("Omitted Attributes:** 1"));
    }

    #[test]
    fn test_player_without_attributes() {
        let mut report = create_test_report();
        report.players[0].overall = None;
        report.players[0].categories.clear();

        let section = generate_player_section(&report.players[0]);
        assert!(section.contains("No attributes scored"));
        assert!(!section.contains("Category Overview"));
    }

    #[test]
    fn test_pipes_in_names_are_escaped() {
        let mut report = create_test_report();
        report.players[0].categories[0].category = "Set | Pieces".to_string();
        report.players[0].categories[0].radar.labels[0] = "Pass | Move".to_string();
        report.team_heatmap[0].attribute_name = "Pass | Move".to_string();

        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("| Set \\| Pieces | 7.0 |"));
        assert!(markdown.contains("| Pass \\| Move | 8 | 6.5 | +1.5 |"));
        assert!(markdown.contains("| Pass \\| Move | 6.50 | 7 |"));
        assert!(!markdown.contains("| Pass | Move |"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"teamHeatmap\""));
        assert!(json.contains("\"colorBand\": \"high\""));
        assert!(json.contains("\"filledValue\""));
        assert!(json.contains("\"omitted\""));
    }
}
