//! # quoteboard-db: Local Store for Quoteboard
//!
//! This crate provides durable key/value persistence for the quote
//! collection and user preferences. It uses SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quoteboard Data Flow                             │
//! │                                                                         │
//! │  QuoteBook (quoteboard-sync)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  quoteboard-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │QuoteRepository│    │  LocalStore   │    │  Migrations  │  │   │
//! │  │   │ (typed keys)  │───►│  get / set    │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                  ┌─────────────┴────────────┐                 │   │
//! │  │                  ▼                          ▼                  │   │
//! │  │           Database (SQLite)          MemoryStore (tests)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`store`] - The `LocalStore` trait and its implementations
//! - [`repository`] - Key/value and typed quote repositories
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quoteboard_db::{Database, DbConfig, QuoteRepository};
//!
//! let db = Database::new(DbConfig::new("quoteboard.db")).await?;
//! let repo = QuoteRepository::new(Arc::new(db));
//!
//! let quotes = repo.load_collection().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{LocalStore, MemoryStore};

pub use repository::kv::KeyValueRepository;
pub use repository::quotes::{QuoteRepository, LAST_CATEGORY_KEY, QUOTES_KEY};
