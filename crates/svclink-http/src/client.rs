//! HTTP client with transparent retry for transient failures.

use std::time::Duration;

use serde_json::Value;

use svclink_core::config::EndpointConfig;
use svclink_core::error::CallError;
use svclink_core::resource::TraceToken;

/// Header carrying the endpoint credential.
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Header carrying the propagated trace token.
pub const TRACE_HEADER: &str = "X-Request-ID";

/// The closed set of verbs this client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    fn as_method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Retrying HTTP client bound to one configured endpoint.
///
/// Retry policy: up to `max_retries` additional attempts, only for
/// connection-level faults and 5xx responses. Attempt `k` (0-indexed) waits
/// `2^k` backoff units before the next try — unbounded exponential growth
/// with no jitter, acceptable for the low attempt counts this client runs
/// with.
///
/// A 5xx on the final permitted attempt is returned to the caller unmodified
/// (the caller inspects the status); a connection fault on the final attempt
/// is raised as a terminal [`CallError`].
pub struct RestClient {
    config: EndpointConfig,
}

impl RestClient {
    pub fn new(config: EndpointConfig) -> Self {
        Self { config }
    }

    /// Execute one logical call with retries.
    pub async fn request(
        &self,
        verb: Verb,
        path: &str,
        trace: Option<&TraceToken>,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, CallError> {
        // One network resource per logical call — dropped on every exit
        // path, so connections never outlive the call.
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .build()
            .map_err(|e| CallError::Unexpected(format!("failed to build http client: {e}")))?;

        let url = format!("{}{}", self.config.base_url, path);
        let mut attempt: u32 = 0;

        loop {
            let mut req = http
                .request(verb.as_method(), &url)
                .header(API_KEY_HEADER, &self.config.api_key);
            if let Some(token) = trace {
                req = req.header(TRACE_HEADER, token.as_str());
            }
            if let Some(json) = body {
                req = req.json(json);
            }

            match req.send().await {
                Ok(resp) => {
                    if resp.status().as_u16() < 500 {
                        return Ok(resp);
                    }
                    if attempt == self.config.max_retries {
                        // Final attempt: hand the server error back unmodified.
                        return Ok(resp);
                    }
                    let wait = backoff_delay(self.config.backoff_unit, attempt);
                    tracing::warn!(
                        status = resp.status().as_u16(),
                        wait_ms = wait.as_millis() as u64,
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        verb = %verb,
                        path,
                        "server error, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    // Only connection-level faults are transient; anything
                    // else (redirect loops, body errors) propagates as-is.
                    if !is_connection_fault(&e) {
                        return Err(classify_transport(&e, self.config.timeout));
                    }
                    if attempt == self.config.max_retries {
                        return Err(classify_transport(&e, self.config.timeout));
                    }
                    let wait = backoff_delay(self.config.backoff_unit, attempt);
                    tracing::warn!(
                        error = %e,
                        wait_ms = wait.as_millis() as u64,
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        verb = %verb,
                        path,
                        "connection fault, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }

    pub async fn get(
        &self,
        path: &str,
        trace: Option<&TraceToken>,
    ) -> Result<reqwest::Response, CallError> {
        self.request(Verb::Get, path, trace, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        trace: Option<&TraceToken>,
        body: &Value,
    ) -> Result<reqwest::Response, CallError> {
        self.request(Verb::Post, path, trace, Some(body)).await
    }

    pub async fn patch(
        &self,
        path: &str,
        trace: Option<&TraceToken>,
        body: &Value,
    ) -> Result<reqwest::Response, CallError> {
        self.request(Verb::Patch, path, trace, Some(body)).await
    }

    pub async fn delete(
        &self,
        path: &str,
        trace: Option<&TraceToken>,
    ) -> Result<reqwest::Response, CallError> {
        self.request(Verb::Delete, path, trace, None).await
    }
}

/// Wait before retry number `attempt + 1`: `2^attempt` backoff units.
fn backoff_delay(unit: Duration, attempt: u32) -> Duration {
    unit.saturating_mul(2u32.saturating_pow(attempt))
}

fn is_connection_fault(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

fn classify_transport(err: &reqwest::Error, timeout: Duration) -> CallError {
    if err.is_timeout() {
        CallError::Timeout {
            ms: timeout.as_millis() as u64,
        }
    } else {
        CallError::Transport(err.to_string())
    }
}
