//! # Quote Repository
//!
//! Typed access to the two values Quoteboard persists.
//!
//! | Key                    | Value                                      |
//! |------------------------|--------------------------------------------|
//! | `quotes`               | JSON array of `{ "text", "category" }`     |
//! | `lastSelectedCategory` | Raw category string, `all` when unfiltered |
//!
//! ## First Run
//! When `quotes` has never been written, [`QuoteRepository::load_collection`]
//! returns the built-in default quotes. The seed is not written back; the
//! first successful mutation persists it together with the change.

use quoteboard_core::{default_quotes, Collection, Preferences};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::store::LocalStore;

/// Key holding the quote collection.
pub const QUOTES_KEY: &str = "quotes";

/// Key holding the last selected category filter.
pub const LAST_CATEGORY_KEY: &str = "lastSelectedCategory";

/// Repository for the quote collection and preferences.
#[derive(Clone)]
pub struct QuoteRepository {
    store: Arc<dyn LocalStore>,
}

impl std::fmt::Debug for QuoteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteRepository").finish_non_exhaustive()
    }
}

impl QuoteRepository {
    /// Creates a repository over any [`LocalStore`].
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        QuoteRepository { store }
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Loads the persisted collection, or the default seed if none exists.
    ///
    /// ## Errors
    /// [`DbError::Corrupted`] if the stored blob is not a valid quote array.
    /// The blob is left in place.
    pub async fn load_collection(&self) -> DbResult<Collection> {
        let Some(raw) = self.store.get(QUOTES_KEY).await? else {
            debug!("No stored collection, seeding defaults");
            return Ok(Collection::from(default_quotes()));
        };

        let collection: Collection = serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "Stored collection could not be decoded");
            DbError::corrupted(QUOTES_KEY, e.to_string())
        })?;

        debug!(count = collection.len(), "Loaded collection");
        Ok(collection)
    }

    /// Replaces the persisted collection.
    pub async fn save_collection(&self, collection: &Collection) -> DbResult<()> {
        let raw = serde_json::to_string(collection)?;
        self.store.set(QUOTES_KEY, &raw).await?;

        debug!(count = collection.len(), "Saved collection");
        Ok(())
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    /// Loads preferences. Missing values fall back to defaults.
    pub async fn load_preferences(&self) -> DbResult<Preferences> {
        let preferences = match self.store.get(LAST_CATEGORY_KEY).await? {
            Some(category) if !category.is_empty() => Preferences {
                last_selected_category: category,
            },
            _ => Preferences::default(),
        };

        Ok(preferences)
    }

    /// Persists preferences.
    pub async fn save_preferences(&self, preferences: &Preferences) -> DbResult<()> {
        self.store
            .set(LAST_CATEGORY_KEY, &preferences.last_selected_category)
            .await
    }
}
