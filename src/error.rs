//! Domain errors raised while building scorecards.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("No team baseline found for attribute: {attribute_id}")]
    BaselineNotFound { attribute_id: String },

    #[error("Heatmap palette must have {expected} colors, found {found}")]
    InvalidPalette { found: usize, expected: usize },
}

impl ScoreError {
    /// Attribute id the error refers to, if any.
    #[allow(dead_code)] // Only used by tests
    pub fn attribute_id(&self) -> Option<&str> {
        match self {
            ScoreError::BaselineNotFound { attribute_id } => Some(attribute_id),
            ScoreError::InvalidPalette { .. } => None,
        }
    }
}
