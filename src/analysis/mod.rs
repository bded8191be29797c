//! Scoring analysis.
//!
//! Category grouping and averages live in the aggregator; the remaining
//! modules turn those into chart-ready radar, gauge and heatmap data.

pub mod aggregator;
pub mod gauge;
pub mod heatmap;
pub mod radar;

pub use aggregator::*;
pub use gauge::*;
pub use heatmap::*;
pub use radar::*;
