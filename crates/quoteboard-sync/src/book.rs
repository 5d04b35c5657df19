//! # Quote Book
//!
//! The single owner of the in-memory quote collection.
//!
//! ## Writers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   add_quote ─────┐                                                     │
//! │   import_json ───┼──► Mutex<Collection> ──► persist ──► commit         │
//! │   apply_remote ──┘         (one writer at a time)                      │
//! │                                                                         │
//! │   Every mutation builds the next collection, persists it, and only     │
//! │   then replaces the in-memory value. A failed write leaves both the    │
//! │   store and memory on the previous collection.                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Network calls never happen while the lock is held.

use quoteboard_core::transfer::{self, EXPORT_FILE_NAME};
use quoteboard_core::validation::validate_new_quote;
use quoteboard_core::{merge, CategoryFilter, Collection, MergeResult, Preferences, Quote};
use quoteboard_db::QuoteRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};
use crate::notify::Presenter;
use crate::remote::{Ack, RemoteSource};

/// Outcome of [`QuoteBook::add_quote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReceipt {
    /// The quote as stored.
    pub quote: Quote,

    /// Remote acknowledgement, `None` when the submit failed.
    pub remote: Option<Ack>,
}

/// Shared quote collection with its persistence and collaborators.
pub struct QuoteBook {
    collection: Mutex<Collection>,
    repo: QuoteRepository,
    remote: Arc<dyn RemoteSource>,
    presenter: Arc<dyn Presenter>,
}

impl QuoteBook {
    /// Loads the collection (default seed on first run) and wraps it.
    pub async fn open(
        repo: QuoteRepository,
        remote: Arc<dyn RemoteSource>,
        presenter: Arc<dyn Presenter>,
    ) -> SyncResult<Self> {
        let collection = repo.load_collection().await?;
        info!(count = collection.len(), "Quote book opened");

        Ok(QuoteBook {
            collection: Mutex::new(collection),
            repo,
            remote,
            presenter,
        })
    }

    /// The remote source new quotes are submitted to.
    pub fn remote(&self) -> &Arc<dyn RemoteSource> {
        &self.remote
    }

    /// The presenter this book renders through.
    pub fn presenter(&self) -> &Arc<dyn Presenter> {
        &self.presenter
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A copy of the current collection.
    pub async fn snapshot(&self) -> Collection {
        self.collection.lock().await.clone()
    }

    /// Distinct categories in order of first appearance.
    pub async fn categories(&self) -> Vec<String> {
        self.collection.lock().await.categories()
    }

    /// Picks a quote uniformly at random among those passing `filter`.
    pub async fn pick_random(&self, filter: &CategoryFilter) -> Option<Quote> {
        let collection = self.collection.lock().await;
        let mut rng = rand::rng();
        quoteboard_core::pick_random(&collection, filter, &mut rng).cloned()
    }

    /// Picks a random quote and renders it.
    pub async fn show_random(&self, filter: &CategoryFilter) -> Option<Quote> {
        let quote = self.pick_random(filter).await;
        self.presenter.render_quote(quote.as_ref());
        quote
    }

    /// Renders the category list.
    pub async fn show_categories(&self) -> Vec<String> {
        let categories = self.categories().await;
        self.presenter.render_categories(&categories);
        categories
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    /// The persisted preferences.
    pub async fn preferences(&self) -> SyncResult<Preferences> {
        Ok(self.repo.load_preferences().await?)
    }

    /// Remembers `filter` as the last selection, then shows a quote from it.
    pub async fn select_category(&self, filter: &CategoryFilter) -> SyncResult<Option<Quote>> {
        self.repo.save_preferences(&Preferences::from(filter)).await?;
        debug!(category = %filter, "Category selected");

        Ok(self.show_random(filter).await)
    }

    /// Shows a quote from the last selected category.
    pub async fn show_last_selected(&self) -> SyncResult<Option<Quote>> {
        let filter = self.preferences().await?.filter();
        Ok(self.show_random(&filter).await)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a user quote.
    ///
    /// ## Order
    /// 1. Validate (nothing changes on failure)
    /// 2. Append and persist under the lock
    /// 3. Refresh categories
    /// 4. Submit to the remote outside the lock; a failure is logged and
    ///    reported in the receipt but the quote stays
    pub async fn add_quote(&self, text: &str, category: &str) -> SyncResult<AddReceipt> {
        validate_new_quote(text, category)?;
        let quote = Quote::new(text, category);

        let categories = self
            .commit(|collection| {
                collection.push(quote.clone());
                Ok(())
            })
            .await?;
        self.presenter.render_categories(&categories);

        info!(category = %quote.category, "Quote added");

        let remote = match self.remote.submit(&quote).await {
            Ok(ack) => Some(ack),
            Err(e) => {
                warn!(error = %e, "Failed to submit quote to remote, keeping local copy");
                None
            }
        };

        Ok(AddReceipt { quote, remote })
    }

    /// Appends every quote in `input` (a JSON array) without merging.
    ///
    /// Returns the number of quotes imported.
    pub async fn import_json(&self, input: &str) -> SyncResult<usize> {
        let imported = transfer::parse_import(input)?;
        let count = imported.len();

        let categories = self
            .commit(|collection| {
                collection.extend(imported);
                Ok(())
            })
            .await?;

        info!(count, "Quotes imported");

        self.presenter.render_categories(&categories);
        self.show_random(&CategoryFilter::All).await;

        Ok(count)
    }

    /// Reads `path` and imports it.
    pub async fn import_file(&self, path: &Path) -> SyncResult<usize> {
        let input = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SyncError::Io(format!("{}: {}", path.display(), e)))?;

        self.import_json(&input).await
    }

    /// Reconciles the collection against remote candidates.
    ///
    /// Persists only when the merge changed something.
    pub async fn apply_remote(&self, remote: &[Quote]) -> SyncResult<MergeResult> {
        let mut collection = self.collection.lock().await;
        let result = merge(&collection, remote);

        if result.changed() {
            self.repo.save_collection(&result.collection).await?;
            *collection = result.collection.clone();
            let categories = collection.categories();
            drop(collection);
            self.presenter.render_categories(&categories);
        }

        debug!(
            added = result.added,
            updated = result.updated,
            conflicts = result.conflicts.len(),
            "Remote candidates applied"
        );

        Ok(result)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// The collection as pretty-printed JSON.
    pub async fn export_json(&self) -> SyncResult<String> {
        let collection = self.collection.lock().await;
        Ok(transfer::export_json(&collection)?)
    }

    /// Writes the export to `target`.
    ///
    /// A directory gets a `quotes.json` inside it; anything else is used as
    /// the file path. Returns the path written.
    pub async fn export_to_file(&self, target: &Path) -> SyncResult<PathBuf> {
        let path = if target.is_dir() {
            target.join(EXPORT_FILE_NAME)
        } else {
            target.to_path_buf()
        };

        let json = self.export_json().await?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| SyncError::Io(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "Quotes exported");
        Ok(path)
    }

    /// Applies `change` to a copy, persists it, then commits it to memory.
    ///
    /// Returns the categories of the committed collection.
    async fn commit<F>(&self, change: F) -> SyncResult<Vec<String>>
    where
        F: FnOnce(&mut Collection) -> SyncResult<()>,
    {
        let mut collection = self.collection.lock().await;
        let mut next = collection.clone();
        change(&mut next)?;

        self.repo.save_collection(&next).await?;
        *collection = next;

        Ok(collection.categories())
    }
}
