//! Error handling module for section-reorder
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Every failure is terminal for a run and leaves the target document untouched.

use thiserror::Error;

use crate::run_state::StageTransitionError;

/// Main error type for section-reorder
#[derive(Error, Debug)]
pub enum ReorderError {
    /// IO errors (reading or writing the document or a profile)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile validation errors
    #[error("Profile error: {0}")]
    Profile(String),

    /// A pattern built from the profile failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex_lite::Error),

    /// One or more sections could not be extracted
    #[error(
        "extracted {found} of {expected} sections; missing: {}",
        .missing.join(", ")
    )]
    SectionCount {
        found: usize,
        expected: usize,
        missing: Vec<String>,
    },

    /// The splice region could not be located
    #[error("Boundary error: {0}")]
    Boundary(String),

    /// Run stage machine was driven out of order
    #[error("Run state error: {0}")]
    Transition(#[from] StageTransitionError),
}

/// Result type alias for section-reorder operations
pub type Result<T> = std::result::Result<T, ReorderError>;

impl ReorderError {
    /// Create a profile validation error
    pub fn profile(msg: impl Into<String>) -> Self {
        Self::Profile(msg.into())
    }

    /// Create a boundary error
    pub fn boundary(msg: impl Into<String>) -> Self {
        Self::Boundary(msg.into())
    }

    /// Labels that failed extraction, if this is an extraction failure
    pub fn missing_labels(&self) -> &[String] {
        match self {
            Self::SectionCount { missing, .. } => missing,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReorderError::boundary("end marker not found");
        assert_eq!(err.to_string(), "Boundary error: end marker not found");

        let err = ReorderError::profile("no sections");
        assert_eq!(err.to_string(), "Profile error: no sections");
    }

    #[test]
    fn test_section_count_lists_missing_labels() {
        let err = ReorderError::SectionCount {
            found: 5,
            expected: 7,
            missing: vec!["三".to_string(), "六".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "extracted 5 of 7 sections; missing: 三, 六"
        );
        assert_eq!(err.missing_labels(), ["三", "六"]);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReorderError = io_err.into();
        assert!(matches!(err, ReorderError::Io(_)));
        assert!(err.missing_labels().is_empty());
    }
}
