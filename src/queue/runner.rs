//! The queue handle and its drain loop.
//!
//! `enqueue` and the drain task share one mutex-protected state; the lock is
//! held only to mutate the pending map and flags, never across a job await.
//! The drain loop is a spawned tokio task that lives for exactly one cycle:
//! it starts when the queue transitions from idle to non-empty and ends when
//! the pending map is empty again.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::types::JobKey;

use super::job::{BoxError, DrainSummary, JobFuture, JobOutcome};
use super::pending::PendingJobs;

/// Hook invoked once per drain cycle, when the queue empties.
type DrainHook = Arc<dyn Fn(DrainSummary) + Send + Sync + 'static>;

/// State shared between `enqueue` callers and the drain task.
struct QueueState {
    pending: PendingJobs,

    /// True while a drain task is running (or about to be spawned).
    draining: bool,

    /// Outcomes accumulated during the active cycle.
    outcomes: Vec<JobOutcome>,
}

/// What the drain loop should do next.
enum Step {
    /// Run this job to completion.
    Run(JobKey, JobFuture),

    /// The map is empty; the cycle is over with these outcomes.
    Finished(Vec<JobOutcome>),
}

/// A single-flight, key-coalescing job queue.
///
/// Cloning is cheap and every clone drives the same queue, so the handle can
/// be shared across the orchestrator freely. Jobs must be enqueued from
/// within a tokio runtime: the drain loop is a spawned task.
#[derive(Clone)]
pub struct JobQueue {
    state: Arc<Mutex<QueueState>>,
    on_drained: Option<DrainHook>,
}

impl JobQueue {
    /// Creates a queue with no drain hook.
    pub fn new() -> Self {
        JobQueue {
            state: Arc::new(Mutex::new(QueueState {
                pending: PendingJobs::new(),
                draining: false,
                outcomes: Vec::new(),
            })),
            on_drained: None,
        }
    }

    /// Creates a queue whose hook is invoked with a [`DrainSummary`] each
    /// time a drain cycle completes.
    pub fn with_drain_hook(hook: impl Fn(DrainSummary) + Send + Sync + 'static) -> Self {
        let mut queue = Self::new();
        queue.on_drained = Some(Arc::new(hook));
        queue
    }

    /// Inserts or replaces the pending job under `key` and returns
    /// immediately; the body runs later, serialized with all other jobs.
    ///
    /// If a job is already pending under `key` it is discarded in favor of
    /// this one (keeping its place in line). If a job under `key` is
    /// currently *executing*, the new entry is independent of it and runs on
    /// its own later turn. Starts a drain task if none is active.
    pub fn enqueue<F>(&self, key: JobKey, job: F)
    where
        F: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        let mut state = self.lock();
        let replaced = state.pending.insert(key.clone(), Box::pin(job));
        if replaced {
            debug!(key = %key, "coalesced pending job with newer submission");
        } else {
            debug!(key = %key, queued = state.pending.len(), "job queued");
        }

        if !state.draining {
            state.draining = true;
            drop(state);
            tokio::spawn(self.clone().drain());
        }
    }

    /// Number of jobs waiting to run (excludes a currently executing job).
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// True while a drain cycle is active.
    pub fn is_draining(&self) -> bool {
        self.lock().draining
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // The lock is never held across an await or a hook invocation;
        // recover from poisoning rather than propagate it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs queued jobs until the pending map is empty, then reports.
    async fn drain(self) {
        debug!("drain cycle started");
        loop {
            let step = {
                let mut state = self.lock();
                match state.pending.pop_oldest() {
                    Some((key, job)) => Step::Run(key, job),
                    None => {
                        state.draining = false;
                        Step::Finished(std::mem::take(&mut state.outcomes))
                    }
                }
            };

            match step {
                Step::Run(key, job) => {
                    debug!(key = %key, "job started");
                    let result = job.await;
                    match &result {
                        Ok(()) => debug!(key = %key, "job finished"),
                        Err(error) => {
                            warn!(key = %key, %error, "job failed; drain continues")
                        }
                    }
                    self.lock().outcomes.push(JobOutcome { key, result });
                }
                Step::Finished(outcomes) => {
                    let summary = DrainSummary::new(outcomes);
                    debug!(jobs = summary.len(), "drain cycle complete");
                    if let Some(hook) = &self.on_drained {
                        hook(summary);
                    }
                    return;
                }
            }
        }
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("JobQueue")
            .field("pending", &state.pending.len())
            .field("draining", &state.draining)
            .finish_non_exhaustive()
    }
}
