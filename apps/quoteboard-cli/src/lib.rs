//! # Quoteboard CLI Library
//!
//! Wires configuration, the Local Store and the sync engine together for
//! the `quoteboard` binary.
//!
//! ## Module Organization
//! ```text
//! quoteboard_cli/
//! ├── lib.rs          ◄─── You are here (startup & command dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! └── presenter.rs    ◄─── Terminal Presenter
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging (stderr, RUST_LOG or default filter)            │
//! │  2. Load SyncConfig (defaults < quoteboard.toml < QUOTEBOARD_* env)    │
//! │  3. Open Local Store                                                   │
//! │     • --ephemeral: MemoryStore                                         │
//! │     • otherwise SQLite: --db > config/env > platform data directory    │
//! │  4. Open QuoteBook (seed defaults on first run)                        │
//! │  5. Dispatch the subcommand                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod presenter;

use anyhow::{bail, Context};
use directories::ProjectDirs;
use quoteboard_core::CategoryFilter;
use quoteboard_db::{Database, DbConfig, LocalStore, MemoryStore, QuoteRepository};
use quoteboard_sync::{
    HttpRemote, QuoteBook, RunOutcome, StatusLine, SyncConfig, SyncError, SyncScheduler,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use presenter::TerminalPresenter;

/// Database file name inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "quoteboard.db";

/// Exit status for bad input or bad configuration.
pub const EXIT_USAGE: u8 = 2;

/// Exit status for everything else.
pub const EXIT_FAILURE: u8 = 1;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quoteboard_sync=trace` - Trace the sync engine only
/// - Default: `info,quoteboard=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quoteboard=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// `--db` wins, then `storage.database_path` (config file or
/// `QUOTEBOARD_DB_PATH`), then the platform data directory.
pub fn database_path(cli: &Cli, config: &SyncConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.clone().or_else(|| config.storage.database_path.clone()) {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("dev", "quoteboard", "quoteboard")
        .context("Could not determine app data directory")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Could not create {}", data_dir.display()))?;

    Ok(data_dir.join(DATABASE_FILE_NAME))
}

async fn open_store(cli: &Cli, config: &SyncConfig) -> anyhow::Result<Arc<dyn LocalStore>> {
    if cli.ephemeral {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let path = database_path(cli, config)?;
    info!(path = %path.display(), "Opening database");
    let db = Database::new(DbConfig::new(path))
        .await
        .context("Failed to open database")?;

    if !db.health_check().await {
        bail!("Database is not answering queries");
    }
    let (total, applied) = db.migration_status().await?;
    debug!(total, applied, "Migrations");

    Ok(Arc::new(db))
}

/// Runs one CLI invocation.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SyncConfig::load(cli.config.clone()).context("Failed to load configuration")?;

    let store = open_store(&cli, &config).await?;
    let remote = Arc::new(HttpRemote::new(&config.remote)?);
    let show_categories = matches!(cli.command, Commands::Categories | Commands::Watch { .. });
    let presenter = Arc::new(TerminalPresenter::new(show_categories));

    let book = Arc::new(QuoteBook::open(QuoteRepository::new(store), remote, presenter).await?);

    match cli.command {
        Commands::Show { category } => match category {
            Some(category) => {
                book.select_category(&CategoryFilter::from(category)).await?;
            }
            None => {
                book.show_last_selected().await?;
            }
        },

        Commands::Categories => {
            book.show_categories().await;
        }

        Commands::Add { text, category } => {
            let receipt = book.add_quote(&text, &category).await?;
            println!("Quote added successfully!");
            if receipt.remote.is_none() {
                println!("(not submitted to the remote; kept locally)");
            }
        }

        Commands::Import { file } => {
            let count = book.import_file(&file).await?;
            println!("Imported {} quotes.", count);
        }

        Commands::Export { output } => {
            let written = book.export_to_file(&output).await?;
            println!("Exported to {}", written.display());
        }

        Commands::Sync => {
            let scheduler = SyncScheduler::new(book.clone(), status_line(&book, &config));
            match scheduler.run_once().await {
                RunOutcome::Completed(report) => println!(
                    "Synced: {} fetched, {} added, {} updated, {} conflicts",
                    report.fetched,
                    report.added,
                    report.updated,
                    report.conflicts.len()
                ),
                RunOutcome::NoCandidates => println!("Nothing to sync (remote empty or unavailable)."),
                RunOutcome::Skipped => println!("A sync is already running."),
                RunOutcome::Failed(reason) => bail!("Sync failed: {}", reason),
            }
        }

        Commands::Watch { interval_secs } => {
            let period = match interval_secs {
                Some(0) => bail!("--interval-secs must be greater than 0"),
                Some(secs) => Duration::from_secs(secs),
                None if config.sync.enabled => config.sync_interval(),
                None => bail!("Periodic sync is disabled (sync.enabled = false)"),
            };

            book.show_categories().await;
            book.show_last_selected().await?;

            let scheduler = Arc::new(SyncScheduler::new(book.clone(), status_line(&book, &config)));
            let handle = scheduler.clone().start(period);
            info!(interval_secs = period.as_secs(), "Watching, press Ctrl-C to stop");

            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Could not listen for Ctrl-C, stopping");
            }

            handle.stop().await;
            let status = scheduler.status().await;
            info!(
                runs = status.runs,
                skipped = status.skipped,
                conflicts = status.conflicts_total,
                "Stopped"
            );
        }
    }

    Ok(())
}

/// Maps a failed run to a process exit status.
///
/// Input and configuration mistakes get [`EXIT_USAGE`]; remote, storage and
/// file failures get [`EXIT_FAILURE`].
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SyncError>() {
        Some(e) if e.is_user_error() || e.is_config_error() => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

fn status_line(book: &QuoteBook, config: &SyncConfig) -> Arc<StatusLine> {
    Arc::new(StatusLine::new(
        book.presenter().clone(),
        config.notification_clear_after(),
    ))
}
