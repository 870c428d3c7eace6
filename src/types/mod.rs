//! Core domain types for the integration layer.
//!
//! These are the identifiers and plain data-transfer shapes exchanged with the
//! remote API. They carry no behavior; all decision logic lives in the
//! orchestrator consuming this crate.

pub mod ids;
pub mod mr;

// Re-export commonly used types at the module level
pub use ids::{JobKey, MrIid, PipelineId, ProjectId, UserId};
pub use mr::{Approvals, Approver, MergeRequest, MrState, Pipeline, PipelineStatus, User};
