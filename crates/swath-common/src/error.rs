//! Error types for swath loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SwathError.
pub type SwathResult<T> = Result<T, SwathError>;

/// Everything that can go wrong between a granule identifier and an
/// in-memory [`Swath`](crate::Swath).
///
/// All variants are terminal for the matchup that requested the swath; the
/// matchup core reports them as a file import error.
#[derive(Debug, Error)]
pub enum SwathError {
    #[error("Invalid granule identifier '{granule}': {message}")]
    InvalidGranule { granule: String, message: String },

    #[error("Swath file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to open swath file {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Missing group '{0}'")]
    MissingGroup(String),

    #[error("Missing variable '{variable}' in group '{group}'")]
    MissingVariable { group: String, variable: String },

    #[error("Shape mismatch for '{name}': expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        name: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Invalid swath format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SwathError {
    /// Create an InvalidGranule error.
    pub fn invalid_granule(granule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGranule {
            granule: granule.into(),
            message: message.into(),
        }
    }

    /// Create a MissingVariable error.
    pub fn missing_variable(group: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::MissingVariable {
            group: group.into(),
            variable: variable.into(),
        }
    }

    /// Short machine-friendly label, carried into exclusion details.
    pub fn kind(&self) -> &'static str {
        match self {
            SwathError::InvalidGranule { .. } => "invalid_granule",
            SwathError::NotFound(_) => "not_found",
            SwathError::Unreadable { .. } => "unreadable",
            SwathError::MissingGroup(_) => "missing_group",
            SwathError::MissingVariable { .. } => "missing_variable",
            SwathError::ShapeMismatch { .. } => "shape_mismatch",
            SwathError::InvalidFormat(_) => "invalid_format",
            SwathError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SwathError::missing_variable("navigation_data", "latitude");
        assert_eq!(
            err.to_string(),
            "Missing variable 'latitude' in group 'navigation_data'"
        );
        assert_eq!(err.kind(), "missing_variable");

        let err = SwathError::ShapeMismatch {
            name: "chlor_a".to_string(),
            expected: (10, 10),
            found: (10, 9),
        };
        assert!(err.to_string().contains("chlor_a"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SwathError = io.into();
        assert_eq!(err.kind(), "io");
    }
}
