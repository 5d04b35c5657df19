//! # Remote Gateway
//!
//! Fetches candidate quotes from the remote source and submits new ones.
//!
//! ## Wire Format
//! ```text
//! GET  <url>   →  200 [{"title": "...", ...}, ...]
//!                  first `fetch_limit` records become
//!                  Quote { text: title, category: "Server" }
//!                  (records past the limit are never inspected; kept
//!                  records without a non-blank string title are dropped)
//!
//! POST <url>   ←  {"text": "...", "category": "..."}
//!              →  2xx {"id": 101, ...}
//! ```
//!
//! The remote has no notion of category, so every fetched quote is tagged
//! with [`SERVER_CATEGORY`].

use async_trait::async_trait;
use quoteboard_core::validation::validate_quote_text;
use quoteboard_core::{Quote, SERVER_CATEGORY};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::RemoteSettings;
use crate::error::{SyncError, SyncResult};

// =============================================================================
// Remote Source Trait
// =============================================================================

/// Acknowledgement returned by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// HTTP status code.
    pub status: u16,

    /// Identifier assigned by the remote, when it returned one.
    pub id: Option<String>,
}

/// A source of remote quotes.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches a bounded batch of candidate quotes.
    ///
    /// ## Errors
    /// Only [`SyncError::RemoteUnavailable`]. Callers treat it exactly like
    /// an empty batch.
    async fn fetch_candidates(&self) -> SyncResult<Vec<Quote>>;

    /// Submits a newly created quote.
    async fn submit(&self, quote: &Quote) -> SyncResult<Ack>;
}

// =============================================================================
// HTTP Remote
// =============================================================================

/// [`RemoteSource`] over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: Client,
    url: String,
    fetch_limit: usize,
}

impl HttpRemote {
    /// Builds a client for the configured endpoint.
    pub fn new(settings: &RemoteSettings) -> SyncResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| SyncError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpRemote {
            client,
            url: settings.url.clone(),
            fetch_limit: settings.fetch_limit,
        })
    }

    async fn fetch_inner(&self) -> Result<Vec<Quote>, reqwest::Error> {
        let mut posts: Vec<Value> = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        posts.truncate(self.fetch_limit);

        Ok(posts
            .into_iter()
            .enumerate()
            .filter_map(|(index, post)| candidate_from_post(index, post))
            .collect())
    }
}

/// Turns one remote record into a candidate, dropping records whose title
/// is missing, not a string, or blank.
fn candidate_from_post(index: usize, mut post: Value) -> Option<Quote> {
    let title = match post.get_mut("title").map(Value::take) {
        Some(Value::String(title)) => title,
        _ => {
            debug!(index, "Skipping remote record without a title");
            return None;
        }
    };

    if let Err(e) = validate_quote_text(&title) {
        debug!(index, error = %e, "Skipping remote record with blank title");
        return None;
    }

    Some(Quote::new(title, SERVER_CATEGORY))
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch_candidates(&self) -> SyncResult<Vec<Quote>> {
        match self.fetch_inner().await {
            Ok(quotes) => {
                debug!(count = quotes.len(), url = %self.url, "Fetched remote candidates");
                Ok(quotes)
            }
            Err(e) => {
                warn!(error = %e, url = %self.url, "Failed to fetch remote quotes");
                Err(SyncError::RemoteUnavailable(e.to_string()))
            }
        }
    }

    async fn submit(&self, quote: &Quote) -> SyncResult<Ack> {
        let response = self
            .client
            .post(&self.url)
            .json(quote)
            .send()
            .await
            .map_err(|e| SyncError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::RemoteRejected {
                status: status.as_u16(),
            });
        }

        // The body is informational only
        let id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| match body.get("id") {
                Some(serde_json::Value::Number(n)) => Some(n.to_string()),
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                _ => None,
            });

        info!(status = status.as_u16(), id = ?id, "Quote submitted to remote");

        Ok(Ack {
            status: status.as_u16(),
            id,
        })
    }
}
