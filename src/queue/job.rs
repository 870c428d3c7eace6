//! Job and outcome types for the queue.

use std::future::Future;
use std::pin::Pin;

use crate::types::JobKey;

/// The error type job bodies may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A queued unit of work: a boxed future, ready to be awaited by the drain
/// loop. Jobs take no arguments and report only success or failure.
pub(crate) type JobFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'static>>;

/// The recorded result of one job execution.
#[derive(Debug)]
pub struct JobOutcome {
    /// The key the job was enqueued under.
    pub key: JobKey,

    /// What the job body returned.
    pub result: Result<(), BoxError>,
}

impl JobOutcome {
    /// Returns true if the job body completed without error.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything that happened in one drain cycle, reported to the drain hook.
///
/// The queue keeps running after a job fails, so a cycle can contain any mix
/// of successes and failures; this summary carries all of them rather than
/// latching onto the first failure.
#[derive(Debug)]
pub struct DrainSummary {
    outcomes: Vec<JobOutcome>,
}

impl DrainSummary {
    pub(crate) fn new(outcomes: Vec<JobOutcome>) -> Self {
        DrainSummary { outcomes }
    }

    /// The outcomes in execution order.
    pub fn outcomes(&self) -> &[JobOutcome] {
        &self.outcomes
    }

    /// Number of jobs that ran in the cycle.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns true if every job in the cycle succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(JobOutcome::is_success)
    }

    /// Iterates over the failed outcomes, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// The first failure of the cycle, if any.
    pub fn first_failure(&self) -> Option<&JobOutcome> {
        self.failures().next()
    }
}
