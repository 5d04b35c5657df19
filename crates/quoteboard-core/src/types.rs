//! # Domain Types
//!
//! Core domain types used throughout Quoteboard.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Quote       │   │   Collection    │   │ CategoryFilter  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  text (key)     │   │  Vec<Quote>     │   │  All            │       │
//! │  │  category       │   │  insertion      │   │  Only(category) │       │
//! │  └─────────────────┘   │  order kept     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Preferences    │   │ ConflictReport  │   │  MergeResult    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  last selected  │   │  text           │   │  collection     │       │
//! │  │  category       │   └─────────────────┘   │  conflicts      │       │
//! │  └─────────────────┘                         │  added/updated  │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Two quotes are "the same quote" when their `text` is byte-for-byte equal.
//! Category plays no part in identity.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ALL_CATEGORIES;

// =============================================================================
// Quote
// =============================================================================

/// A single quote. `text` is the de-duplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    /// The quote itself. Exact match (case and whitespace sensitive).
    pub text: String,

    /// Free-form category label.
    pub category: String,
}

impl Quote {
    /// Creates a new quote.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Returns true if both quotes carry the same text.
    #[inline]
    pub fn same_text(&self, other: &Quote) -> bool {
        self.text == other.text
    }
}

/// The built-in quotes used when nothing has been persisted yet.
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The greatest glory in living lies not in never falling, but in rising every time we fall.",
            "Inspirational",
        ),
        Quote::new(
            "The way to get started is to quit talking and begin doing.",
            "Motivational",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
    ]
}

// =============================================================================
// Collection
// =============================================================================

/// Ordered sequence of quotes.
///
/// No uniqueness is enforced here: imports may append duplicates. The merge
/// engine is what guarantees one entry per remote text.
///
/// Serializes as a plain JSON array, which is both the persisted blob and
/// the export file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(Vec<Quote>);

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Collection(Vec::new())
    }

    /// Number of quotes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no quotes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.0.iter()
    }

    /// Borrows the underlying slice.
    pub fn as_slice(&self) -> &[Quote] {
        &self.0
    }

    /// Appends a quote at the end.
    pub fn push(&mut self, quote: Quote) {
        self.0.push(quote);
    }

    /// Appends quotes at the end without de-duplication.
    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        self.0.extend(quotes);
    }

    /// Index of the first quote whose text equals `text`.
    pub fn position_of_text(&self, text: &str) -> Option<usize> {
        self.0.iter().position(|q| q.text == text)
    }

    /// Replaces the quote at `index`, returning the previous value.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub(crate) fn replace(&mut self, index: usize, quote: Quote) -> Quote {
        std::mem::replace(&mut self.0[index], quote)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for quote in &self.0 {
            if !seen.iter().any(|c| c == &quote.category) {
                seen.push(quote.category.clone());
            }
        }
        seen
    }

    /// Quotes matching the filter, in collection order.
    pub fn filtered<'a>(&'a self, filter: &CategoryFilter) -> Vec<&'a Quote> {
        self.0.iter().filter(|q| filter.matches(q)).collect()
    }
}

impl From<Vec<Quote>> for Collection {
    fn from(quotes: Vec<Quote>) -> Self {
        Collection(quotes)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Which quotes to consider when picking one to display.
///
/// The string form is `"all"` for [`CategoryFilter::All`] and the exact
/// category label otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No filter.
    #[default]
    All,

    /// Exact category match.
    Only(String),
}

impl CategoryFilter {
    /// Returns true if the quote passes this filter.
    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => quote.category == *category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{}", ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// User preferences persisted independently of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Preferences {
    /// Category filter chosen last time (`"all"` when never chosen).
    pub last_selected_category: String,
}

impl Preferences {
    /// The stored category as a filter.
    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::from(self.last_selected_category.as_str())
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            last_selected_category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl From<&CategoryFilter> for Preferences {
    fn from(filter: &CategoryFilter) -> Self {
        Preferences {
            last_selected_category: filter.to_string(),
        }
    }
}

// =============================================================================
// Merge Output
// =============================================================================

/// A remote quote overwrote a local quote with the same text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConflictReport {
    /// Text shared by the local and remote quote.
    pub text: String,
}

/// Output of [`crate::merge::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeResult {
    /// The reconciled collection.
    pub collection: Collection,

    /// One report per remote quote whose text already existed locally.
    pub conflicts: Vec<ConflictReport>,

    /// Remote quotes appended because their text was new.
    pub added: usize,

    /// Replacements that actually changed the stored value.
    pub updated: usize,
}

impl MergeResult {
    /// Returns true if the merged collection differs from the local input.
    ///
    /// A conflict whose remote value equals the local one does not count.
    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0
    }

    /// Returns true if at least one conflict was reported.
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
