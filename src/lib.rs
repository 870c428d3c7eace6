//! Merge Valet - the platform integration layer of a merge-request bot.
//!
//! This library talks to a GitLab-style REST API on behalf of an orchestrator
//! and serializes the orchestrator's asynchronous reconciliation jobs so that
//! at most one runs at a time. It provides:
//!
//! - A resilient request executor with bounded fixed-interval retry over
//!   transient network failures and 5xx responses ([`api`]).
//! - Pure response classification and payload shape validation ([`api::validate`]).
//! - A single-flight, key-coalescing job queue that drains in insertion order
//!   and reports per-job outcomes when a drain cycle completes ([`queue`]).
//!
//! Merge policy (when to merge, rebase, or comment) and process wiring live in
//! the orchestrator, not here.

pub mod api;
pub mod logging;
pub mod queue;
pub mod types;

#[cfg(test)]
pub mod test_utils;
