//! Authenticated, retrying HTTP dispatch to the Lunch Money API.
//!
//! Every tool goes through [`ApiClient::send`]. The client injects the bearer
//! token, bounds each network call with a hard timeout, and retries a fixed set
//! of transient statuses with capped exponential backoff. A `Retry-After`
//! header from the server takes precedence over the computed backoff.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;

/// Hard limit on a single upstream call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Retries after the first attempt, so at most `MAX_RETRIES + 1` calls.
pub const MAX_RETRIES: u32 = 3;

/// Statuses that trigger an automatic retry.
pub const RETRYABLE_STATUS_CODES: [u16; 4] = [429, 502, 503, 504];

const BASE_BACKOFF_MS: u64 = 1_000;
const MAX_BACKOFF_MS: u64 = 10_000;

/// Errors raised by the dispatcher. Non-2xx responses are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Timeout, DNS failure, refused or reset connection.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// A successful response whose body was not the expected JSON.
    #[error("invalid JSON in response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One outbound call: method, path relative to the base URL, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, None)
    }
}

/// Whether `status` is in the retryable set.
pub fn is_retryable(status: StatusCode) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status.as_u16())
}

/// Delay before retry number `attempt` (zero-based).
///
/// A numeric `Retry-After` (seconds) wins and is not capped. Otherwise the
/// delay is `1000 * 2^attempt` ms, capped at 10 s.
pub fn retry_delay(headers: &HeaderMap, attempt: u32) -> Duration {
    let retry_after = headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|secs| secs.is_finite())
        // A negative hint means "now"; one too large for a Duration is ignored.
        .and_then(|secs| Duration::try_from_secs_f64(secs.max(0.0)).ok());

    if let Some(delay) = retry_after {
        return delay;
    }

    let backoff = BASE_BACKOFF_MS
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(MAX_BACKOFF_MS);
    Duration::from_millis(backoff)
}

/// HTTP client bound to one immutable [`Config`].
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<Config>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Dispatch `request`, retrying transient statuses.
    ///
    /// Returns the final response whatever its status, including the last
    /// retryable response once the retry budget is spent. Transport failures
    /// abort immediately and are never retried.
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.config.base_url(), request.path);
        let mut attempt = 0;

        loop {
            let mut builder = self
                .http
                .request(request.method.clone(), &url)
                .bearer_auth(self.config.api_token())
                .timeout(REQUEST_TIMEOUT);
            if let Some(body) = &request.body {
                // Sets Content-Type: application/json.
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status();

            if is_retryable(status) && attempt < MAX_RETRIES {
                let delay = retry_delay(response.headers(), attempt);
                warn!(
                    method = %request.method,
                    path = %request.path,
                    status = status.as_u16(),
                    delay_ms = delay.as_millis() as u64,
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "Retrying {} {} ({}) in {}ms (attempt {}/{})",
                    request.method,
                    request.path,
                    status.as_u16(),
                    delay.as_millis(),
                    attempt + 1,
                    MAX_RETRIES
                );
                // Release the connection before waiting.
                drop(response);
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            debug!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                attempts = attempt + 1,
                "upstream call finished"
            );
            return Ok(response);
        }
    }
}
