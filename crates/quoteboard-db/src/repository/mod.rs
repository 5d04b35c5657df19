//! # Repository Module
//!
//! ## Layers
//! ```text
//! QuoteBook
//!     │  repo.load_collection() / repo.save_preferences(..)
//!     ▼
//! QuoteRepository      typed access, fixed keys, JSON encoding
//!     │  store.get("quotes") / store.set("quotes", blob)
//!     ▼
//! LocalStore           Database (KeyValueRepository) or MemoryStore
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KeyValueRepository`] - Raw SQL over the `kv_store` table
//! - [`quotes::QuoteRepository`] - Collection and preference access

pub mod kv;
pub mod quotes;
