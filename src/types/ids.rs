//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different ID types (e.g., using a
//! PipelineId where a ProjectId is expected) and make the code more
//! self-documenting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A project identifier on the remote platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProjectId {
    fn from(n: u64) -> Self {
        ProjectId(n)
    }
}

/// A merge request's internal id, scoped to its project.
///
/// This is the number that appears in merge request URLs and is what the API
/// expects in per-project endpoints (as opposed to the instance-global id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MrIid(pub u64);

impl fmt::Display for MrIid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}", self.0)
    }
}

impl From<u64> for MrIid {
    fn from(n: u64) -> Self {
        MrIid(n)
    }
}

/// A CI pipeline identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineId(pub u64);

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PipelineId {
    fn from(n: u64) -> Self {
        PipelineId(n)
    }
}

/// A user identifier on the remote platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        UserId(n)
    }
}

/// A key identifying a unit of work in the job queue.
///
/// Jobs enqueued under the same key before execution starts coalesce: only the
/// most recent submission runs. The orchestrator typically keys jobs by merge
/// request (e.g. `mr-42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobKey(pub String);

impl JobKey {
    pub fn new(s: impl Into<String>) -> Self {
        JobKey(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates the conventional key for a merge request reconciliation job.
    pub fn for_merge_request(iid: MrIid) -> Self {
        JobKey(format!("mr-{}", iid.0))
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobKey {
    fn from(s: String) -> Self {
        JobKey(s)
    }
}

impl From<&str> for JobKey {
    fn from(s: &str) -> Self {
        JobKey(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn project_id_serde_roundtrip(n: u64) {
            let id = ProjectId(n);
            let json = serde_json::to_string(&id).unwrap();
            let parsed: ProjectId = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(id, parsed);
        }

        #[test]
        fn mr_iid_display_format(n: u64) {
            prop_assert_eq!(format!("{}", MrIid(n)), format!("!{}", n));
        }

        #[test]
        fn job_key_serde_is_transparent(s in "[a-z0-9-]{1,30}") {
            let key = JobKey::new(&s);
            let json = serde_json::to_string(&key).unwrap();
            prop_assert_eq!(json, format!("\"{}\"", s));
        }

        #[test]
        fn merge_request_key_format(n: u64) {
            let key = JobKey::for_merge_request(MrIid(n));
            let expected = format!("mr-{}", n);
            prop_assert_eq!(key.as_str(), expected.as_str());
        }
    }

    #[test]
    fn display_matches_as_str() {
        let key = JobKey::new("mr-42");
        assert_eq!(format!("{}", key), key.as_str());
    }
}
