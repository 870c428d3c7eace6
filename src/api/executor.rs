//! Bounded fixed-interval retry for API requests.
//!
//! The executor issues one logical request as up to `max_attempts` HTTP
//! attempts. Two failure classes are retried: transient transport errors
//! (timeouts, connect/DNS failures) and 5xx responses. Attempts are separated
//! by a constant backoff interval; there is no exponential growth and no
//! jitter. The client is a low-QPS integration layer, and a constant interval
//! keeps its worst-case call duration easy to reason about.
//!
//! Everything else (4xx included) is returned to the caller unretried; the
//! validation layer classifies it.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::warn;

use super::error::ApiError;
use super::request::{ApiRequest, Method};

/// Name of the authentication header the API expects.
const AUTH_HEADER: &str = "Private-Token";

/// Configuration for the request executor.
///
/// All knobs are explicit so tests can inject millisecond-scale values and
/// observe retry behavior deterministically.
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    /// Maximum number of HTTP attempts for one logical request, including the
    /// initial attempt.
    pub max_attempts: u32,

    /// Fixed interval slept between attempts.
    pub backoff: Duration,

    /// Timeout applied to each individual attempt.
    pub attempt_timeout: Duration,
}

impl ExecutorConfig {
    /// Default configuration: 20 attempts, 10s apart, 10s per-attempt timeout.
    ///
    /// Worst case a single call occupies the caller for a little over six
    /// minutes before giving up.
    pub const DEFAULT: Self = Self {
        max_attempts: 20,
        backoff: Duration::from_secs(10),
        attempt_timeout: Duration::from_secs(10),
    };

    /// Creates a new executor configuration.
    pub fn new(max_attempts: u32, backoff: Duration, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
            attempt_timeout,
        }
    }

    /// Builds a configuration from the environment, falling back to defaults.
    ///
    /// Honors `MERGE_VALET_MAX_ATTEMPTS` and `MERGE_VALET_BACKOFF_SECS`.
    /// Unparseable values fall back to the default rather than failing
    /// startup.
    pub fn from_env() -> Self {
        let mut config = Self::DEFAULT;

        if let Ok(val) = std::env::var("MERGE_VALET_MAX_ATTEMPTS") {
            if let Ok(n) = val.parse::<u32>() {
                if n > 0 {
                    config.max_attempts = n;
                }
            }
        }

        if let Ok(val) = std::env::var("MERGE_VALET_BACKOFF_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                config.backoff = Duration::from_secs(secs);
            }
        }

        config
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Returns true if a transport error is expected to resolve itself on retry.
///
/// Timeouts and connect-class failures (which is where DNS resolution errors
/// surface) are transient; anything else is not.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Issues one logical request, retrying transient failures.
///
/// Returns the response as soon as an attempt completes with a status below
/// 500; status validation is the caller's job. Fails with:
///
/// - [`ApiError::TransientNetwork`] after `max_attempts` transient transport
///   failures,
/// - [`ApiError::Server`] after `max_attempts` responses with status >= 500,
/// - [`ApiError::Transport`] immediately on a non-transient transport error.
pub(crate) async fn send_with_retry(
    http: &reqwest::Client,
    base_url: &str,
    token: &str,
    config: &ExecutorConfig,
    request: &ApiRequest,
) -> Result<reqwest::Response, ApiError> {
    let url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        request.path().trim_start_matches('/')
    );

    let mut attempt: u32 = 0;
    loop {
        attempt += 1;

        let mut builder = match request.method() {
            Method::Get => http.get(&url),
            Method::Put => http.put(&url),
            Method::Post => http.post(&url),
        }
        .header(AUTH_HEADER, token)
        .header(CONTENT_TYPE, "application/json")
        .timeout(config.attempt_timeout);

        if let Some(params) = request.params() {
            builder = match request.method() {
                Method::Get => builder.query(params),
                Method::Put | Method::Post => builder.json(params),
            };
        }

        match builder.send().await {
            Ok(response) if response.status().is_server_error() => {
                let status = response.status().as_u16();
                if attempt >= config.max_attempts {
                    return Err(ApiError::Server { status, attempts: attempt });
                }
                warn!(
                    method = request.method().as_str(),
                    path = request.path(),
                    status,
                    attempt,
                    "server error, retrying after backoff"
                );
                tokio::time::sleep(config.backoff).await;
            }
            Ok(response) => return Ok(response),
            Err(err) if is_transient(&err) => {
                if attempt >= config.max_attempts {
                    return Err(ApiError::TransientNetwork {
                        attempts: attempt,
                        source: err,
                    });
                }
                warn!(
                    method = request.method().as_str(),
                    path = request.path(),
                    attempt,
                    error = %err,
                    "transient network error, retrying after backoff"
                );
                tokio::time::sleep(config.backoff).await;
            }
            Err(err) => return Err(ApiError::Transport(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ExecutorConfig::DEFAULT;
        assert_eq!(config.max_attempts, 20);
        assert_eq!(config.backoff, Duration::from_secs(10));
        assert_eq!(config.attempt_timeout, Duration::from_secs(10));
    }

    #[test]
    fn default_trait_matches_const() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_attempts, ExecutorConfig::DEFAULT.max_attempts);
        assert_eq!(config.backoff, ExecutorConfig::DEFAULT.backoff);
    }

    #[test]
    fn new_sets_all_fields() {
        let config = ExecutorConfig::new(3, Duration::from_millis(5), Duration::from_millis(50));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff, Duration::from_millis(5));
        assert_eq!(config.attempt_timeout, Duration::from_millis(50));
    }
}
