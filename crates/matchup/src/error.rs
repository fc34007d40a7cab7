//! Error types for the matchup core.
//!
//! Rejections (file import errors, invalid navigation, distance) are not
//! errors: they are reported through [`MatchupOutcome::Excluded`]. The types
//! here cover failures to produce any output at all.
//!
//! [`MatchupOutcome::Excluded`]: crate::MatchupOutcome::Excluded

use thiserror::Error;

/// Errors that can occur while running a matchup.
#[derive(Error, Debug)]
pub enum MatchupError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A finished output file could not be moved into place.
    #[error("failed to persist output file: {0}")]
    Persist(String),
}

impl From<tempfile::PersistError> for MatchupError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Persist(err.to_string())
    }
}

/// Result type for matchup operations.
pub type Result<T> = std::result::Result<T, MatchupError>;
