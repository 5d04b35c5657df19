//! # Validation Module
//!
//! Input validation for new quotes.
//!
//! Checks are blank-after-trim checks only. Accepted values are stored
//! exactly as typed, because quote identity is exact text equality.
//!
//! ## Usage
//! ```rust
//! use quoteboard_core::validation::validate_new_quote;
//!
//! assert!(validate_new_quote("Keep going.", "Motivational").is_ok());
//! assert!(validate_new_quote("   ", "Motivational").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Quote;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates quote text: must not be empty or whitespace only.
pub fn validate_quote_text(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::required("text"));
    }
    Ok(())
}

/// Validates a category label: must not be empty or whitespace only.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::required("category"));
    }
    Ok(())
}

/// Validates both fields of a new quote. Text is checked first.
pub fn validate_new_quote(text: &str, category: &str) -> ValidationResult<()> {
    validate_quote_text(text)?;
    validate_category(category)
}

/// Validates an already-built quote (used for imported entries).
pub fn validate_quote(quote: &Quote) -> ValidationResult<()> {
    validate_new_quote(&quote.text, &quote.category)
}
