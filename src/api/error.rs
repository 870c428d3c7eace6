//! API error taxonomy.
//!
//! The split between retryable and terminal failures is decided exactly once:
//! transport errors and 5xx responses are retried inside the executor and only
//! surface here after exhausting attempts; everything else is terminal on the
//! first occurrence.

use std::fmt;

use thiserror::Error;

/// The payload shape a caller expected from a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// A single JSON object.
    Object,
    /// A JSON array of objects.
    Collection,
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadShape::Object => write!(f, "an object"),
            PayloadShape::Collection => write!(f, "a collection"),
        }
    }
}

/// An error from one logical API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Every attempt failed with a transient network error (timeout or
    /// connect/DNS class). Carries the number of attempts made.
    #[error("network failure after {attempts} attempts")]
    TransientNetwork {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// Every attempt came back with a 5xx status.
    #[error("server error (HTTP {status}) after {attempts} attempts")]
    Server { status: u16, attempts: u32 },

    /// The transport failed in a way retrying cannot fix.
    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    /// The API rejected our credentials (HTTP 401). Terminal for the call.
    #[error("authentication failed (HTTP 401)")]
    AuthenticationFailed,

    /// The credentials are valid but not allowed to do this (HTTP 403).
    /// Terminal for the call.
    #[error("not allowed (HTTP 403)")]
    AuthorizationFailed,

    /// Any other non-success status (4xx other than auth, or a 5xx that
    /// already exhausted the executor's retries before validation).
    #[error("unexpected response (HTTP {status})")]
    Failed { status: u16 },

    /// The response body was not valid JSON.
    #[error("failed to decode response body")]
    Decode(#[source] reqwest::Error),

    /// The response decoded but did not have the expected shape.
    #[error("malformed payload: expected {expected}")]
    MalformedPayload { expected: PayloadShape },

    /// The payload had the right shape but did not match the typed model.
    #[error("failed to deserialize response payload")]
    Deserialize(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns true if the failure was recovered-from locally (retried) before
    /// surfacing, as opposed to terminal on first occurrence.
    pub fn is_exhausted_retry(&self) -> bool {
        matches!(
            self,
            ApiError::TransientNetwork { .. } | ApiError::Server { .. }
        )
    }

    /// Returns the HTTP status associated with the error, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Failed { status } => Some(*status),
            ApiError::AuthenticationFailed => Some(401),
            ApiError::AuthorizationFailed => Some(403),
            _ => None,
        }
    }
}
