//! # quoteboard-sync: Reconciliation Engine for Quoteboard
//!
//! This crate owns the shared quote collection and keeps it reconciled
//! with a remote source on a timer, reporting outcomes to a presenter.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reconciliation Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  SyncScheduler (timer + Idle/Running gate)       │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │ run_once                                │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ RemoteSource   │  │   QuoteBook    │  │  NotificationSink      │    │
//! │  │                │  │                │  │                        │    │
//! │  │ fetch (GET)    │  │ merge + persist│  │ StatusLine: visible    │    │
//! │  │ submit (POST)  │  │ add / import / │  │ now, cleared after     │    │
//! │  │ HttpRemote     │  │ export / pick  │  │ 3000 ms                │    │
//! │  └────────────────┘  └───────┬────────┘  └────────────────────────┘    │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  QuoteRepository (quoteboard-db)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`book`] - `QuoteBook`, the single writer of the collection
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Sync error types
//! - [`notify`] - `Presenter` observer and the transient status line
//! - [`remote`] - `RemoteSource` trait and the HTTP implementation
//! - [`scheduler`] - `SyncScheduler` and its handle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quoteboard_sync::{HttpRemote, NoOpPresenter, QuoteBook, StatusLine, SyncConfig, SyncScheduler};
//!
//! let config = SyncConfig::load_or_default(None);
//! let remote = Arc::new(HttpRemote::new(&config.remote)?);
//! let book = Arc::new(QuoteBook::open(repo, remote, Arc::new(NoOpPresenter)).await?);
//!
//! let sink = Arc::new(StatusLine::new(book.presenter().clone(), config.notification_clear_after()));
//! let scheduler = Arc::new(SyncScheduler::new(book.clone(), sink));
//! let handle = scheduler.clone().start(config.sync_interval());
//!
//! book.add_quote("Simplicity is prerequisite for reliability.", "Engineering").await?;
//!
//! handle.stop().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod config;
pub mod error;
pub mod notify;
pub mod remote;
pub mod scheduler;

// =============================================================================
// Re-exports
// =============================================================================

pub use book::{AddReceipt, QuoteBook};
pub use config::{
    NotificationSettings, RemoteSettings, StorageSettings, SyncConfig, SyncSettings,
    DEFAULT_REMOTE_URL,
};
pub use error::{SyncError, SyncResult};
pub use notify::{
    conflict_message, NoOpPresenter, NotificationSink, Presenter, StatusLine, SYNCED_MESSAGE,
};
pub use remote::{Ack, HttpRemote, RemoteSource};
pub use scheduler::{
    RunOutcome, SchedulerHandle, SchedulerState, SyncReport, SyncScheduler, SyncStatus,
};
