//! # quoteboard-core: Pure Quote Logic
//!
//! This crate is the **heart** of Quoteboard. It contains the data model and
//! the reconciliation rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quoteboard Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presenter (CLI / web)                        │   │
//! │  │    show quote ──► categories ──► add ──► import/export          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              quoteboard-sync (QuoteBook, Scheduler)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quoteboard-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   merge   │  │  select   │  │ transfer  │  │   │
//! │  │   │   Quote   │  │  remote   │  │  random   │  │ JSON in/  │  │   │
//! │  │   │Collection │  │   wins    │  │   pick    │  │   out     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Quote, Collection, CategoryFilter, ...)
//! - [`merge`] - Merge engine (remote wins on equal text)
//! - [`select`] - Uniform random pick over a filtered collection
//! - [`transfer`] - JSON export/import codec
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use quoteboard_core::{merge, Collection, Quote};
//!
//! let local = Collection::from(vec![Quote::new("A", "X"), Quote::new("B", "Y")]);
//! let remote = vec![Quote::new("B", "Z"), Quote::new("C", "W")];
//!
//! let result = merge(&local, &remote);
//! assert_eq!(result.collection.len(), 3);
//! assert_eq!(result.conflicts.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod merge;
pub mod select;
pub mod transfer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use merge::merge;
pub use select::pick_random;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Filter value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Category assigned to every quote fetched from the remote source.
///
/// The remote source has no category concept, so all of its records land
/// under this label.
pub const SERVER_CATEGORY: &str = "Server";

/// Maximum number of remote records consumed per fetch.
pub const DEFAULT_FETCH_LIMIT: usize = 5;

/// Default period between reconciliation runs.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;

/// How long a notification stays visible unless superseded.
pub const NOTIFICATION_CLEAR_MS: u64 = 3000;

/// Upper bound on a single remote round trip.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;
