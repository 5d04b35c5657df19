//! # Presentation and Notifications
//!
//! The core never touches a display. It talks to a [`Presenter`] and
//! reports reconciliation outcomes through a [`NotificationSink`].
//!
//! ## Status Line Lifecycle
//! ```text
//!   notify("A")          notify("B")                      3000 ms after "B"
//!       │                    │                                   │
//!       ▼                    ▼                                   ▼
//!   show("A")  gen=1     show("B")  gen=2                   show(None)
//!       │                    │
//!       └── clear timer      └── clear timer (gen 2)
//!           (gen 1, stale:
//!            does nothing)
//! ```

use quoteboard_core::Quote;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Shown after a reconciliation changed the collection.
pub const SYNCED_MESSAGE: &str = "Quotes synced with server!";

/// Message shown when a remote quote replaced a local one.
pub fn conflict_message(text: &str) -> String {
    format!("Conflict resolved for quote: \"{}\"", text)
}

// =============================================================================
// Presenter Trait
// =============================================================================

/// Display collaborator (implemented by the CLI, a web shell, tests...).
pub trait Presenter: Send + Sync {
    /// Shows a notification, or clears it when `None`.
    fn show_notification(&self, message: Option<&str>);

    /// Renders the selected quote, or the empty state when `None`.
    fn render_quote(&self, quote: Option<&Quote>);

    /// Renders the category list.
    fn render_categories(&self, categories: &[String]);
}

/// Presenter that discards everything.
pub struct NoOpPresenter;

impl Presenter for NoOpPresenter {
    fn show_notification(&self, _message: Option<&str>) {}
    fn render_quote(&self, _quote: Option<&Quote>) {}
    fn render_categories(&self, _categories: &[String]) {}
}

// =============================================================================
// Notification Sink
// =============================================================================

/// Fire-and-forget message output.
pub trait NotificationSink: Send + Sync {
    /// Emits a message. Must not block.
    fn notify(&self, message: &str);
}

#[derive(Debug, Default)]
struct StatusState {
    generation: u64,
    current: Option<String>,
}

/// Transient status line.
///
/// A message is visible immediately and cleared after `clear_after`,
/// unless a newer message arrived in the meantime.
#[derive(Clone)]
pub struct StatusLine {
    presenter: Arc<dyn Presenter>,
    clear_after: Duration,
    state: Arc<Mutex<StatusState>>,
}

impl StatusLine {
    /// Creates a status line in front of `presenter`.
    pub fn new(presenter: Arc<dyn Presenter>, clear_after: Duration) -> Self {
        StatusLine {
            presenter,
            clear_after,
            state: Arc::new(Mutex::new(StatusState::default())),
        }
    }

    /// The message currently visible.
    pub fn current(&self) -> Option<String> {
        self.state
            .lock()
            .map(|state| state.current.clone())
            .unwrap_or_default()
    }

    fn clear_if_current(&self, generation: u64) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if state.generation == generation {
            state.current = None;
            self.presenter.show_notification(None);
            debug!(generation, "Status line cleared");
        }
    }
}

impl NotificationSink for StatusLine {
    fn notify(&self, message: &str) {
        let generation = {
            let Ok(mut state) = self.state.lock() else {
                warn!("Status line state poisoned, dropping message");
                return;
            };
            state.generation += 1;
            state.current = Some(message.to_string());
            self.presenter.show_notification(Some(message));
            state.generation
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let line = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(line.clear_after).await;
                    line.clear_if_current(generation);
                });
            }
            Err(_) => warn!("No async runtime, status line will not auto-clear"),
        }
    }
}
