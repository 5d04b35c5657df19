//! # Local Store
//!
//! The minimal persistence contract the rest of Quoteboard relies on:
//! string values under string keys.
//!
//! ```text
//! ┌───────────────────────┐      ┌───────────────────────┐
//! │  Database (SQLite)    │      │  MemoryStore          │
//! │  kv_store table       │      │  HashMap, process-    │
//! │  durable across runs  │      │  local, for tests and │
//! │                       │      │  --ephemeral          │
//! └───────────┬───────────┘      └───────────┬───────────┘
//!             └──────────────┬───────────────┘
//!                            ▼
//!                 impl LocalStore (get / set)
//! ```
//!
//! A `set` that returns `Ok` has completed; callers never fire and forget.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::DbResult;
use crate::pool::Database;

/// Key/value persistence.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;
}

#[async_trait]
impl LocalStore for Database {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.kv().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.kv().set(key, value).await
    }
}

/// In-memory store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns true if nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use std::sync::Arc;

    async fn exercise(store: Arc<dyn LocalStore>) {
        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_memory_store_contract() {
        let store = Arc::new(MemoryStore::new());
        assert!(store.is_empty().await);
        exercise(store.clone()).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_database_store_contract() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        exercise(Arc::new(db)).await;
    }

    #[tokio::test]
    async fn test_database_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoteboard.db");

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            db.set("lastSelectedCategory", "Life").await.unwrap();
            db.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(
            db.get("lastSelectedCategory").await.unwrap().as_deref(),
            Some("Life")
        );
    }
}
