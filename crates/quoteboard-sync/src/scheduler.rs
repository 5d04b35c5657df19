//! # Sync Scheduler
//!
//! Runs reconciliation on a fixed interval and on demand, never two at once.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            run_once()                                                   │
//! │   ┌──────┐ ─────────────► ┌─────────┐                                  │
//! │   │ Idle │                │ Running │ ── run_once() ──► Skipped        │
//! │   └──────┘ ◄───────────── └─────────┘    (dropped, not queued)         │
//! │        any exit path: success, remote failure, persist failure,        │
//! │        panic unwinding through the run                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Run
//! ```text
//! fetch_candidates ──► empty / unavailable ──► NoCandidates
//!        │
//!        ▼
//! QuoteBook::apply_remote (merge + persist if changed)
//!        │
//!        ├── persist failed ──► Failed
//!        ▼
//! notify one message per conflict, then "Quotes synced with server!"
//! when the collection changed ──► Completed
//! ```
//!
//! Stopping the scheduler stops the timer. A run already in flight is
//! allowed to finish so that persistence is never cut in half.

use chrono::{DateTime, Utc};
use quoteboard_core::ConflictReport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::book::QuoteBook;
use crate::notify::{conflict_message, NotificationSink, SYNCED_MESSAGE};

// =============================================================================
// Status Types
// =============================================================================

/// Whether a reconciliation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Nothing running.
    #[default]
    Idle,

    /// A run is in flight; new triggers are dropped.
    Running,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Identifier carried in the run's tracing span.
    pub run_id: Uuid,

    /// Candidates returned by the remote.
    pub fetched: usize,

    /// Remote quotes appended.
    pub added: usize,

    /// Local quotes whose value was replaced.
    pub updated: usize,

    /// Remote texts that already existed locally.
    pub conflicts: Vec<ConflictReport>,

    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// Returns true if the run changed the collection.
    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Result of a single [`SyncScheduler::run_once`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Another run was in flight.
    Skipped,

    /// The remote returned nothing usable; the cycle was skipped.
    NoCandidates,

    /// Candidates were merged.
    Completed(SyncReport),

    /// The merged collection could not be persisted.
    Failed(String),
}

/// Counters and timestamps for external queries.
#[derive(Debug, Clone, Default)]
pub struct SyncStatus {
    /// Current state.
    pub state: SchedulerState,

    /// Last run that reached the remote and merged successfully.
    pub last_sync: Option<DateTime<Utc>>,

    /// Last error message (if any).
    pub last_error: Option<String>,

    /// Runs that got past the gate.
    pub runs: u64,

    /// Triggers dropped because a run was in flight.
    pub skipped: u64,

    /// Conflicts reported across all runs.
    pub conflicts_total: u64,
}

// =============================================================================
// Run Gate
// =============================================================================

/// Holds the `Running` state; dropping it returns to `Idle`.
struct RunGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

// =============================================================================
// Sync Scheduler
// =============================================================================

/// Periodic and on-demand reconciliation.
pub struct SyncScheduler {
    book: Arc<QuoteBook>,
    sink: Arc<dyn NotificationSink>,
    running: AtomicBool,
    status: RwLock<SyncStatus>,
}

impl SyncScheduler {
    /// Creates a scheduler for `book`, reporting through `sink`.
    pub fn new(book: Arc<QuoteBook>, sink: Arc<dyn NotificationSink>) -> Self {
        SyncScheduler {
            book,
            sink,
            running: AtomicBool::new(false),
            status: RwLock::new(SyncStatus::default()),
        }
    }

    /// Current state of the gate.
    pub fn state(&self) -> SchedulerState {
        if self.running.load(Ordering::Acquire) {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Snapshot of counters and timestamps.
    pub async fn status(&self) -> SyncStatus {
        let mut status = self.status.read().await.clone();
        status.state = self.state();
        status
    }

    fn try_begin(&self) -> Option<RunGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard {
                running: &self.running,
            })
    }

    /// Runs one reconciliation cycle unless one is already in flight.
    pub async fn run_once(&self) -> RunOutcome {
        let Some(_guard) = self.try_begin() else {
            debug!("Sync already running, dropping trigger");
            self.status.write().await.skipped += 1;
            return RunOutcome::Skipped;
        };

        let run_id = Uuid::new_v4();
        self.status.write().await.runs += 1;

        self.execute(run_id)
            .instrument(info_span!("sync_run", %run_id))
            .await
    }

    async fn execute(&self, run_id: Uuid) -> RunOutcome {
        debug!("Fetching remote candidates");

        let candidates = match self.book.remote().fetch_candidates().await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Remote unavailable, skipping cycle");
                self.status.write().await.last_error = Some(e.to_string());
                return RunOutcome::NoCandidates;
            }
        };

        if candidates.is_empty() {
            debug!("No remote candidates, skipping cycle");
            return RunOutcome::NoCandidates;
        }

        let result = match self.book.apply_remote(&candidates).await {
            Ok(result) => result,
            Err(e) => {
                if e.is_retryable() {
                    warn!(error = %e, "Failed to persist merged collection, next cycle retries");
                } else {
                    error!(error = %e, "Failed to persist merged collection");
                }
                self.status.write().await.last_error = Some(e.to_string());
                return RunOutcome::Failed(e.to_string());
            }
        };

        for conflict in &result.conflicts {
            self.sink.notify(&conflict_message(&conflict.text));
        }
        if result.changed() {
            self.sink.notify(SYNCED_MESSAGE);
        }

        let report = SyncReport {
            run_id,
            fetched: candidates.len(),
            added: result.added,
            updated: result.updated,
            conflicts: result.conflicts,
            finished_at: Utc::now(),
        };

        {
            let mut status = self.status.write().await;
            status.last_sync = Some(report.finished_at);
            status.last_error = None;
            status.conflicts_total += report.conflicts.len() as u64;
        }

        info!(
            fetched = report.fetched,
            added = report.added,
            updated = report.updated,
            conflicts = report.conflicts.len(),
            "Sync run completed"
        );

        RunOutcome::Completed(report)
    }

    /// Starts ticking every `period`. The first tick is one period from now.
    ///
    /// Each tick spawns [`Self::run_once`], so a tick that lands while a
    /// slow run is still in flight is dropped by the gate.
    pub fn start(self: Arc<Self>, period: Duration) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            info!(interval_secs = period.as_secs_f64(), "Sync scheduler starting");

            let mut ticker =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            let mut in_flight: JoinSet<RunOutcome> = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let scheduler = Arc::clone(&self);
                        in_flight.spawn(async move { scheduler.run_once().await });
                    }

                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                        if let Err(e) = joined {
                            error!(error = %e, "Sync run task failed");
                        }
                    }

                    _ = shutdown_rx.recv() => {
                        info!("Sync scheduler shutting down");
                        break;
                    }
                }
            }

            // Let in-flight runs finish
            while let Some(joined) = in_flight.join_next().await {
                if let Err(e) = joined {
                    error!(error = %e, "Sync run task failed");
                }
            }

            info!("Sync scheduler stopped");
        });

        SchedulerHandle { shutdown_tx, task }
    }
}

// =============================================================================
// Scheduler Handle
// =============================================================================

/// Handle for stopping a started scheduler.
pub struct SchedulerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops ticking and waits until any in-flight run has finished.
    pub async fn stop(self) {
        // The loop may already be gone; the join below still completes
        let _ = self.shutdown_tx.send(()).await;

        if let Err(e) = self.task.await {
            error!(error = %e, "Sync scheduler task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SyncError, SyncResult};
    use crate::notify::NoOpPresenter;
    use crate::remote::{Ack, RemoteSource};
    use async_trait::async_trait;
    use quoteboard_core::Quote;
    use quoteboard_db::{MemoryStore, QuoteRepository};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    struct ScriptedRemote {
        batch: Vec<Quote>,
        fail: bool,
        fetches: AtomicUsize,
    }

    impl ScriptedRemote {
        fn returning(batch: Vec<Quote>) -> Self {
            ScriptedRemote {
                batch,
                fail: false,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RemoteSource for ScriptedRemote {
        async fn fetch_candidates(&self) -> SyncResult<Vec<Quote>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SyncError::RemoteUnavailable("connection refused".into()));
            }
            Ok(self.batch.clone())
        }

        async fn submit(&self, _quote: &Quote) -> SyncResult<Ack> {
            Ok(Ack { status: 201, id: None })
        }
    }

    #[derive(Default)]
    struct Collected(Mutex<Vec<String>>);

    impl NotificationSink for Collected {
        fn notify(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    async fn scheduler_for(remote: Arc<ScriptedRemote>) -> (Arc<SyncScheduler>, Arc<Collected>) {
        let store = Arc::new(MemoryStore::new());
        let repo = QuoteRepository::new(store);
        repo.save_collection(&vec![Quote::new("A", "X"), Quote::new("B", "Y")].into())
            .await
            .unwrap();

        let book = QuoteBook::open(repo, remote, Arc::new(NoOpPresenter))
            .await
            .unwrap();
        let sink = Arc::new(Collected::default());
        (Arc::new(SyncScheduler::new(Arc::new(book), sink.clone())), sink)
    }

    #[tokio::test]
    async fn test_run_once_merges_and_notifies() {
        let remote = Arc::new(ScriptedRemote::returning(vec![
            Quote::new("B", "Z"),
            Quote::new("C", "W"),
        ]));
        let (scheduler, sink) = scheduler_for(remote).await;

        let RunOutcome::Completed(report) = scheduler.run_once().await else {
            panic!("expected a completed run");
        };

        assert_eq!(report.fetched, 2);
        assert_eq!(report.added, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(report.conflicts, vec![ConflictReport { text: "B".into() }]);
        assert_eq!(
            *sink.0.lock().unwrap(),
            vec![
                "Conflict resolved for quote: \"B\"".to_string(),
                "Quotes synced with server!".to_string(),
            ]
        );

        let status = scheduler.status().await;
        assert_eq!(status.state, SchedulerState::Idle);
        assert_eq!(status.runs, 1);
        assert_eq!(status.conflicts_total, 1);
        assert!(status.last_sync.is_some());
    }

    #[tokio::test]
    async fn test_unchanged_merge_only_reports_conflicts() {
        let remote = Arc::new(ScriptedRemote::returning(vec![Quote::new("A", "X")]));
        let (scheduler, sink) = scheduler_for(remote).await;

        let outcome = scheduler.run_once().await;
        assert!(matches!(outcome, RunOutcome::Completed(ref r) if !r.changed()));
        assert_eq!(
            *sink.0.lock().unwrap(),
            vec!["Conflict resolved for quote: \"A\"".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remote_failure_returns_to_idle() {
        let remote = Arc::new(ScriptedRemote {
            batch: vec![],
            fail: true,
            fetches: AtomicUsize::new(0),
        });
        let (scheduler, sink) = scheduler_for(remote.clone()).await;

        assert_eq!(scheduler.run_once().await, RunOutcome::NoCandidates);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.status().await.last_error.is_some());

        // Next cycle still runs
        assert_eq!(scheduler.run_once().await, RunOutcome::NoCandidates);
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 2);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_is_skipped() {
        let remote = Arc::new(ScriptedRemote::returning(vec![]));
        let (scheduler, sink) = scheduler_for(remote).await;

        assert_eq!(scheduler.run_once().await, RunOutcome::NoCandidates);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_started_scheduler_ticks_after_first_period() {
        let remote = Arc::new(ScriptedRemote::returning(vec![Quote::new("C", "W")]));
        let (scheduler, _) = scheduler_for(remote.clone()).await;

        let handle = scheduler.clone().start(Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 2);

        handle.stop().await;

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(remote.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.status().await.runs, 2);
    }
}
