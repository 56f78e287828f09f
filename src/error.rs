//! Error types for palette extraction.

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, PaletteError>;

/// The only way extraction fails is a degenerate input; it is deterministic,
/// so retrying the same call gives the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Empty bitmap, mismatched pixel buffer, or a zero color budget.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl PaletteError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
