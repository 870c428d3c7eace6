//! Remote API client and resilient request executor.
//!
//! This module implements the HTTP boundary of the integration layer.
//!
//! Key features:
//! - Fixed-interval bounded retry for transient network failures and 5xx
//!   responses
//! - Pure status classification deciding retryable vs terminal once, at the
//!   validation boundary
//! - Payload shape validation (object vs collection) after status validation
//! - A thin typed client exposing the handful of endpoints the orchestrator
//!   drives

mod client;
mod error;
mod executor;
mod request;
pub mod validate;

pub use client::GitlabClient;
pub use error::{ApiError, PayloadShape};
pub use executor::ExecutorConfig;
pub use request::{ApiRequest, Method};
