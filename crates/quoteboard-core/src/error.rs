//! # Error Types
//!
//! Domain-specific error types for quoteboard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quoteboard-core errors (this file)                                    │
//! │  ├── CoreError        - Codec and domain failures                      │
//! │  └── ValidationError  - Empty or malformed user input                  │
//! │                                                                         │
//! │  quoteboard-db errors (separate crate)                                 │
//! │  └── DbError          - Local Store failures                           │
//! │                                                                         │
//! │  quoteboard-sync errors (separate crate)                               │
//! │  └── SyncError        - Remote, persistence, config failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SyncError → CLI (anyhow)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Import payload is not a JSON array of `{text, category}` objects.
    #[error("Invalid import data: {0}")]
    InvalidImport(String),

    /// Collection could not be encoded to JSON.
    #[error("Failed to encode quotes: {0}")]
    Encode(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are reported to the user synchronously and abort the operation
/// before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// An imported entry is invalid.
    #[error("entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("text");
        assert_eq!(err.to_string(), "text is required");

        let err = ValidationError::InvalidEntry {
            index: 2,
            reason: "category is required".to_string(),
        };
        assert_eq!(err.to_string(), "entry 2: category is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("category").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: category is required"
        );
    }
}
