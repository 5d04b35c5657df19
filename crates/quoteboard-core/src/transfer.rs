//! # Import / Export Codec
//!
//! JSON encoding for moving a collection in and out of a flat file.
//!
//! ```text
//! export:  Collection ──► pretty JSON array ──► quotes.json
//! import:  file text  ──► Vec<Quote>        ──► appended as-is (no merge)
//! ```
//!
//! File access lives in quoteboard-sync; this module only converts text.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Collection, Quote};
use crate::validation::validate_quote;

/// File name offered for exported collections.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Serializes the whole collection as pretty-printed JSON.
pub fn export_json(collection: &Collection) -> CoreResult<String> {
    serde_json::to_string_pretty(collection).map_err(|e| CoreError::Encode(e.to_string()))
}

/// Parses an import file.
///
/// The payload must be a JSON array of `{text, category}` objects. Every
/// entry is validated; one bad entry rejects the whole file so that a
/// partial import never happens.
pub fn parse_import(input: &str) -> CoreResult<Vec<Quote>> {
    let quotes: Vec<Quote> =
        serde_json::from_str(input).map_err(|e| CoreError::InvalidImport(e.to_string()))?;

    for (index, quote) in quotes.iter().enumerate() {
        validate_quote(quote).map_err(|e| ValidationError::InvalidEntry {
            index,
            reason: e.to_string(),
        })?;
    }

    Ok(quotes)
}
