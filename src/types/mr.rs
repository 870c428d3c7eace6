//! Merge request, pipeline, approval and user payload shapes.
//!
//! These mirror the JSON the remote API returns. They are plain data carriers:
//! deciding what to do with a merge request is the orchestrator's business.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MrIid, PipelineId, ProjectId, UserId};

/// The lifecycle state of a merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MrState {
    Opened,
    Closed,
    Locked,
    Merged,
}

/// A merge request as returned by the API.
///
/// Only the fields the integration layer and its consumers use are modelled;
/// unknown fields in the payload are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Instance-global id.
    pub id: u64,

    /// Project-scoped id, used in per-project endpoints.
    pub iid: MrIid,

    pub project_id: ProjectId,

    pub title: String,

    pub state: MrState,

    pub source_branch: String,

    pub target_branch: String,

    /// Head commit SHA. Absent on some list payloads.
    #[serde(default)]
    pub sha: Option<String>,

    /// The server's mergeability verdict (e.g. `can_be_merged`). Absent until
    /// the server has computed it.
    #[serde(default)]
    pub merge_status: Option<String>,

    #[serde(default)]
    pub author: Option<User>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The status of a CI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Created,
    Pending,
    Running,
    Success,
    Failed,
    Canceled,
    Skipped,
    Manual,
}

/// A CI pipeline attached to a merge request head.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: PipelineId,

    pub status: PipelineStatus,

    /// The commit the pipeline ran against.
    pub sha: String,

    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    pub username: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// One entry in an approval list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approver {
    pub user: User,
}

/// The approval state of a merge request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approvals {
    /// How many further approvals are required before the MR may merge.
    #[serde(default)]
    pub approvals_left: u32,

    #[serde(default)]
    pub approved_by: Vec<Approver>,
}
