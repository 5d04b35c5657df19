//! # Sync Error Types
//!
//! Error types for collection access and reconciliation.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  User Input     │  │   Remote        │  │     Local               │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  Unavailable    │  │  Persistence            │ │
//! │  │  InvalidImport  │  │  Rejected       │  │  Io, Encode             │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Configuration: InvalidConfig, InvalidUrl, ConfigLoad/SaveFailed│   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation
//! - Remote failures never stop the scheduler: a fetch failure skips the
//!   cycle, a submit failure is logged and the local add stands.
//! - Persistence failures are always surfaced. Losing user data silently
//!   is not acceptable.

use quoteboard_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering collection access, remote calls and config.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // User Input Errors
    // =========================================================================
    /// A required input was empty or blank.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An import file could not be used.
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// The remote source could not be reached or returned unusable data.
    ///
    /// ## When This Occurs
    /// - Network failure or timeout
    /// - Non-success status on fetch
    /// - Response body is not the expected JSON
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// The remote source answered a submit with a non-success status.
    #[error("Remote rejected the request with status {status}")]
    RemoteRejected { status: u16 },

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// The Local Store failed to read or write.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// File system error during import or export.
    #[error("I/O error: {0}")]
    Io(String),

    /// The collection could not be serialized for export.
    #[error("Encoding failed: {0}")]
    Encode(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid remote URL.
    #[error("Invalid remote URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<quoteboard_db::DbError> for SyncError {
    fn from(err: quoteboard_db::DbError) -> Self {
        SyncError::Persistence(err.to_string())
    }
}

impl From<CoreError> for SyncError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => SyncError::Validation(e),
            CoreError::InvalidImport(msg) => SyncError::InvalidImport(msg),
            CoreError::Encode(msg) => SyncError::Encode(msg),
        }
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Returns true if the same operation may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncError::RemoteUnavailable(_) | SyncError::Persistence(_) | SyncError::Io(_)
        )
    }

    /// Returns true if the error is caused by what the user typed or supplied.
    pub fn is_user_error(&self) -> bool {
        matches!(self, SyncError::Validation(_) | SyncError::InvalidImport(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::InvalidUrl(_)
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }
}
