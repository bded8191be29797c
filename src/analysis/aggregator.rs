//! Score aggregation and statistics.
//!
//! This module groups scored attributes by category and computes the
//! averages that feed the gauges and the team baselines.

use crate::models::{CategoryEntry, CategoryGroup, ScoredAttribute, TeamAverage};
use std::collections::HashMap;

/// Group attributes by category.
///
/// Categories appear in first-seen order and each keeps its attributes in
/// input order. Empty input yields an empty group.
pub fn group_by_category(attributes: &[ScoredAttribute]) -> CategoryGroup {
    let mut grouped = CategoryGroup::default();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for attribute in attributes {
        let slot = match slots.get(attribute.category.as_str()) {
            Some(&slot) => slot,
            None => {
                let slot = grouped.entries.len();
                grouped.entries.push(CategoryEntry {
                    category: attribute.category.clone(),
                    attributes: Vec::new(),
                });
                slots.insert(attribute.category.as_str(), slot);
                slot
            }
        };

        grouped.entries[slot].attributes.push(attribute.clone());
    }

    grouped
}

/// Mean score of a set of attributes, `None` when empty.
pub fn mean_score(attributes: &[ScoredAttribute]) -> Option<f64> {
    if attributes.is_empty() {
        return None;
    }

    let total: u32 = attributes.iter().map(|a| u32::from(a.score)).sum();
    Some(total as f64 / attributes.len() as f64)
}

/// Mean player score per category, in group order.
pub fn category_averages(grouped: &CategoryGroup) -> Vec<(String, f64)> {
    grouped
        .iter()
        .filter_map(|entry| {
            mean_score(&entry.attributes).map(|avg| (entry.category.clone(), avg))
        })
        .collect()
}

/// Average raw score rows from many players into per-attribute baselines.
///
/// Output follows first-seen attribute order; the category comes from the
/// first row seen for each attribute.
pub fn team_averages(rows: &[ScoredAttribute]) -> Vec<TeamAverage> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut totals: HashMap<&str, (u32, u32)> = HashMap::new();

    for row in rows {
        let entry = totals.entry(row.attribute_id.as_str()).or_insert_with(|| {
            order.push((row.attribute_id.as_str(), row.category.as_str()));
            (0, 0)
        });
        entry.0 += u32::from(row.score);
        entry.1 += 1;
    }

    order
        .into_iter()
        .filter_map(|(id, category)| {
            totals.get(id).map(|&(sum, count)| TeamAverage {
                attribute_id: id.to_string(),
                category: category.to_string(),
                avg_score: sum as f64 / count as f64,
            })
        })
        .collect()
}

/// Get the top N attributes by score (highest first, ties keep input order).
pub fn strongest_attributes(attributes: &[ScoredAttribute], n: usize) -> Vec<ScoredAttribute> {
    let mut sorted: Vec<ScoredAttribute> = attributes.to_vec();
    sorted.sort_by_key(|a| std::cmp::Reverse(a.score));
    sorted.truncate(n);
    sorted
}

/// Get the bottom N attributes by score (lowest first, ties keep input order).
pub fn weakest_attributes(attributes: &[ScoredAttribute], n: usize) -> Vec<ScoredAttribute> {
    let mut sorted: Vec<ScoredAttribute> = attributes.to_vec();
    sorted.sort_by_key(|a| a.score);
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_attribute(id: &str, category: &str, score: u8) -> ScoredAttribute {
        ScoredAttribute {
            attribute_id: id.to_string(),
            name: format!("Attr {}", id),
            category: category.to_string(),
            score,
        }
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let attributes = vec![
            create_test_attribute("1", "A", 5),
            create_test_attribute("2", "B", 6),
            create_test_attribute("3", "A", 7),
        ];

        let grouped = group_by_category(&attributes);

        assert_eq!(grouped.categories(), vec!["A", "B"]);
        let a: Vec<_> = grouped
            .get("A")
            .unwrap()
            .iter()
            .map(|x| x.attribute_id.as_str())
            .collect();
        assert_eq!(a, vec!["1", "3"]);
    }

    #[test]
    fn test_group_keeps_every_attribute() {
        let attributes = vec![
            create_test_attribute("1", "technical", 5),
            create_test_attribute("2", "physical", 6),
            create_test_attribute("3", "mental", 7),
            create_test_attribute("4", "physical", 2),
            create_test_attribute("5", "technical", 9),
            create_test_attribute("1", "technical", 4),
        ];

        let grouped = group_by_category(&attributes);

        assert_eq!(grouped.attribute_count(), attributes.len());
        assert_eq!(grouped.len(), 3);
    }

    #[test]
    fn test_group_is_case_preserving() {
        let attributes = vec![
            create_test_attribute("1", "Technical", 5),
            create_test_attribute("2", "technical", 6),
        ];

        let grouped = group_by_category(&attributes);
        assert_eq!(grouped.categories(), vec!["Technical", "technical"]);
    }

    #[test]
    fn test_group_empty_input() {
        let grouped = group_by_category(&[]);
        assert!(grouped.is_empty());
        assert_eq!(grouped.attribute_count(), 0);
    }

    #[test]
    fn test_group_is_idempotent() {
        let attributes = vec![
            create_test_attribute("1", "A", 5),
            create_test_attribute("2", "B", 6),
        ];
        assert_eq!(group_by_category(&attributes), group_by_category(&attributes));
    }

    #[test]
    fn test_mean_score() {
        let attributes = vec![
            create_test_attribute("1", "A", 4),
            create_test_attribute("2", "A", 7),
        ];
        assert_eq!(mean_score(&attributes), Some(5.5));
        assert_eq!(mean_score(&[]), None);
    }

    #[test]
    fn test_category_averages() {
        let attributes = vec![
            create_test_attribute("1", "A", 4),
            create_test_attribute("2", "B", 9),
            create_test_attribute("3", "A", 8),
        ];

        let averages = category_averages(&group_by_category(&attributes));
        assert_eq!(
            averages,
            vec![("A".to_string(), 6.0), ("B".to_string(), 9.0)]
        );
    }

    #[test]
    fn test_team_averages() {
        let rows = vec![
            create_test_attribute("2", "physical", 4),
            create_test_attribute("1", "technical", 8),
            create_test_attribute("2", "physical", 7),
            create_test_attribute("1", "technical", 5),
        ];

        let averages = team_averages(&rows);

        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].attribute_id, "2");
        assert_eq!(averages[0].category, "physical");
        assert_eq!(averages[0].avg_score, 5.5);
        assert_eq!(averages[1].attribute_id, "1");
        assert_eq!(averages[1].avg_score, 6.5);
    }

    #[test]
    fn test_team_averages_empty() {
        assert!(team_averages(&[]).is_empty());
    }

    #[test]
    fn test_strongest_and_weakest() {
        let attributes = vec![
            create_test_attribute("1", "A", 3),
            create_test_attribute("2", "A", 9),
            create_test_attribute("3", "B", 6),
            create_test_attribute("4", "B", 9),
        ];

        let top = strongest_attributes(&attributes, 2);
        assert_eq!(top[0].attribute_id, "2");
        assert_eq!(top[1].attribute_id, "4");

        let bottom = weakest_attributes(&attributes, 1);
        assert_eq!(bottom.len(), 1);
        assert_eq!(bottom[0].attribute_id, "1");
    }
}
