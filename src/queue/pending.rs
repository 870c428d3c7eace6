//! Insertion-ordered pending job map with per-key coalescing.
//!
//! Iteration order over a plain hash map is unspecified, so the drain order
//! is made explicit: a FIFO list of keys plus a lookup table holding the
//! current body for each key. Replacing a pending body keeps the key's
//! original position in the FIFO.

use std::collections::{HashMap, VecDeque};

use crate::types::JobKey;

use super::job::JobFuture;

/// The set of jobs waiting to run, at most one per key.
#[derive(Default)]
pub(crate) struct PendingJobs {
    /// Keys in the order their current entry first joined the queue.
    order: VecDeque<JobKey>,

    /// The body that will run for each queued key.
    jobs: HashMap<JobKey, JobFuture>,
}

impl PendingJobs {
    pub fn new() -> Self {
        PendingJobs {
            order: VecDeque::new(),
            jobs: HashMap::new(),
        }
    }

    /// Inserts a job under `key`, replacing any pending body for that key.
    ///
    /// Returns true if a pending body was replaced (coalesced). A replaced
    /// key keeps its position in the drain order.
    pub fn insert(&mut self, key: JobKey, job: JobFuture) -> bool {
        let replaced = self.jobs.insert(key.clone(), job).is_some();
        if !replaced {
            self.order.push_back(key);
        }
        replaced
    }

    /// Removes and returns the oldest pending entry, or `None` when empty.
    pub fn pop_oldest(&mut self) -> Option<(JobKey, JobFuture)> {
        let key = self.order.pop_front()?;
        let job = self
            .jobs
            .remove(&key)
            .expect("every key in the drain order has a pending body");
        Some((key, job))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::arb_job_key;
    use proptest::prelude::*;

    fn noop_job() -> JobFuture {
        Box::pin(async { Ok(()) })
    }

    #[test]
    fn pops_in_insertion_order() {
        let mut pending = PendingJobs::new();
        pending.insert(JobKey::new("a"), noop_job());
        pending.insert(JobKey::new("b"), noop_job());
        pending.insert(JobKey::new("c"), noop_job());

        assert_eq!(pending.pop_oldest().unwrap().0.as_str(), "a");
        assert_eq!(pending.pop_oldest().unwrap().0.as_str(), "b");
        assert_eq!(pending.pop_oldest().unwrap().0.as_str(), "c");
        assert!(pending.pop_oldest().is_none());
    }

    #[test]
    fn insert_reports_coalescing() {
        let mut pending = PendingJobs::new();
        assert!(!pending.insert(JobKey::new("a"), noop_job()));
        assert!(pending.insert(JobKey::new("a"), noop_job()));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn replacement_keeps_position() {
        let mut pending = PendingJobs::new();
        pending.insert(JobKey::new("a"), noop_job());
        pending.insert(JobKey::new("b"), noop_job());
        pending.insert(JobKey::new("a"), noop_job());

        assert_eq!(pending.pop_oldest().unwrap().0.as_str(), "a");
        assert_eq!(pending.pop_oldest().unwrap().0.as_str(), "b");
    }

    #[test]
    fn key_can_requeue_after_pop() {
        let mut pending = PendingJobs::new();
        pending.insert(JobKey::new("a"), noop_job());
        pending.pop_oldest();
        assert!(!pending.insert(JobKey::new("a"), noop_job()));
        assert_eq!(pending.len(), 1);
    }

    proptest! {
        /// The pop sequence is the insertion sequence deduplicated to each
        /// key's first occurrence.
        #[test]
        fn pop_order_is_first_occurrence_order(
            keys in prop::collection::vec(arb_job_key(), 0..20),
        ) {
            let mut pending = PendingJobs::new();
            for key in &keys {
                pending.insert(key.clone(), noop_job());
            }

            let mut expected = Vec::new();
            for key in &keys {
                if !expected.contains(key) {
                    expected.push(key.clone());
                }
            }

            let mut popped = Vec::new();
            while let Some((key, _)) = pending.pop_oldest() {
                popped.push(key);
            }
            prop_assert_eq!(popped, expected);
        }

        /// Length always equals the number of distinct pending keys.
        #[test]
        fn len_counts_distinct_keys(
            keys in prop::collection::vec(arb_job_key(), 0..20),
        ) {
            let mut pending = PendingJobs::new();
            for key in &keys {
                pending.insert(key.clone(), noop_job());
            }

            let distinct: std::collections::HashSet<_> = keys.iter().collect();
            prop_assert_eq!(pending.len(), distinct.len());
        }
    }
}
