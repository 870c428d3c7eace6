//! Response classification and payload shape validation.
//!
//! Status classification is a pure function of the status code; the executor
//! has already absorbed every retryable failure by the time a response gets
//! here, so whatever classification says is terminal for the call. Shape
//! checks run after status validation: an endpoint documented to return a
//! single object must actually produce one, and likewise for collections.

use serde_json::{Map, Value};

use super::error::{ApiError, PayloadShape};

/// The classification of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Status in [200, 300).
    Success,

    /// HTTP 401: the token was rejected. Never retried.
    AuthenticationFailure,

    /// HTTP 403: the token is valid but forbidden from this operation.
    /// Never retried.
    AuthorizationFailure,

    /// Anything else, including 5xx responses that already exhausted the
    /// executor's retry budget.
    GenericFailure(u16),
}

/// Classifies a status code. Pure and total.
pub fn classify(status: u16) -> StatusClass {
    match status {
        401 => StatusClass::AuthenticationFailure,
        403 => StatusClass::AuthorizationFailure,
        200..=299 => StatusClass::Success,
        other => StatusClass::GenericFailure(other),
    }
}

/// Validates a response's status and decodes its JSON body.
///
/// Auth failures and generic failures map to their terminal [`ApiError`]
/// variants; on success the body is decoded but not yet shape-checked.
pub async fn into_json(response: reqwest::Response) -> Result<Value, ApiError> {
    match classify(response.status().as_u16()) {
        StatusClass::Success => response.json().await.map_err(ApiError::Decode),
        StatusClass::AuthenticationFailure => Err(ApiError::AuthenticationFailed),
        StatusClass::AuthorizationFailure => Err(ApiError::AuthorizationFailed),
        StatusClass::GenericFailure(status) => Err(ApiError::Failed { status }),
    }
}

/// Requires the decoded body to be a single JSON object.
pub fn expect_object(value: Value) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::MalformedPayload {
            expected: PayloadShape::Object,
        }),
    }
}

/// Requires the decoded body to be a JSON array.
pub fn expect_collection(value: Value) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ApiError::MalformedPayload {
            expected: PayloadShape::Collection,
        }),
    }
}
