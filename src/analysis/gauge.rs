//! Doughnut gauge classification.

use crate::models::{Gauge, GaugeBand};

/// Lowest value a gauge shows; matches the lowest valid score.
pub const GAUGE_MIN: f64 = 1.0;

/// Full-scale value of a gauge.
pub const GAUGE_MAX: f64 = 10.0;

/// Scores at or below this are `Low`.
const LOW_CEILING: f64 = 5.0;

/// Scores at or above this are `High`.
const HIGH_FLOOR: f64 = 7.0;

impl GaugeBand {
    /// Classify a score into a band.
    pub fn for_score(score: f64) -> Self {
        if score <= LOW_CEILING {
            GaugeBand::Low
        } else if score < HIGH_FLOOR {
            GaugeBand::Mid
        } else {
            GaugeBand::High
        }
    }
}

/// Split a score into filled and remainder segments and pick its band.
///
/// Scores are clamped to `[1, 10]`; NaN is treated as 1.
pub fn colorize_score(score: f64) -> Gauge {
    let filled = if score.is_nan() {
        GAUGE_MIN
    } else {
        score.clamp(GAUGE_MIN, GAUGE_MAX)
    };
    let remainder = GAUGE_MAX - filled;

    Gauge {
        filled_value: filled,
        remainder_value: (remainder > 0.0).then_some(remainder),
        color_band: GaugeBand::for_score(filled),
    }
}
