//! Channel establishment: TLS auto-selection, keep-alive tuning and bounded
//! reconnect backoff.

use std::time::Duration;

use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use svclink_core::config::RpcEndpointConfig;
use svclink_core::error::CallError;

/// Scheme-qualified URI for the configured target.
pub(crate) fn target_uri(config: &RpcEndpointConfig) -> String {
    let scheme = if config.tls_enabled() { "https" } else { "http" };
    format!("{scheme}://{}", config.target)
}

fn build_endpoint(config: &RpcEndpointConfig) -> Result<Endpoint, CallError> {
    let mut endpoint = Endpoint::from_shared(target_uri(config))
        .map_err(|e| CallError::Transport(format!("invalid rpc target {}: {e}", config.target)))?
        .connect_timeout(config.connect_timeout)
        .http2_keep_alive_interval(config.keepalive_interval)
        .keep_alive_timeout(config.keepalive_timeout)
        .keep_alive_while_idle(true);

    if config.tls_enabled() {
        let tls = ClientTlsConfig::new().with_native_roots();
        endpoint = endpoint
            .tls_config(tls)
            .map_err(|e| CallError::Transport(format!("tls setup failed: {e}")))?;
    }

    Ok(endpoint)
}

/// Retries after the first failed connect attempt.
const DIAL_RETRIES: u32 = 3;

/// Delay doubles each attempt, clamped to the window maximum.
fn next_backoff(current: Duration, max: Duration) -> Duration {
    current.saturating_mul(2).min(max)
}

/// Dial the endpoint, doubling the backoff inside the configured reconnect
/// window. Bounded by attempt count so a zero or tiny window still
/// terminates.
pub(crate) async fn dial(config: &RpcEndpointConfig) -> Result<Channel, CallError> {
    let endpoint = build_endpoint(config)?;
    let mut backoff = config.reconnect_initial.min(config.reconnect_max);
    let mut attempt = 0u32;

    loop {
        match endpoint.connect().await {
            Ok(channel) => return Ok(channel),
            Err(e) => {
                attempt += 1;
                if attempt > DIAL_RETRIES {
                    return Err(CallError::Transport(format!(
                        "connect to {} failed after {attempt} attempts: {e}",
                        config.target
                    )));
                }
                tracing::warn!(
                    target = %config.target,
                    error = %e,
                    backoff_ms = backoff.as_millis() as u64,
                    attempt,
                    "rpc connect failed, backing off"
                );
                tokio::time::sleep(backoff).await;
                backoff = next_backoff(backoff, config.reconnect_max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_scheme_for_port_443() {
        let config = RpcEndpointConfig::new("products.internal:443");
        assert_eq!(target_uri(&config), "https://products.internal:443");
    }

    #[test]
    fn secure_scheme_when_flag_is_set() {
        let mut config = RpcEndpointConfig::new("products.internal:50051");
        config.use_tls = true;
        assert_eq!(target_uri(&config), "https://products.internal:50051");
    }

    #[test]
    fn plaintext_scheme_otherwise() {
        let config = RpcEndpointConfig::new("localhost:50051");
        assert_eq!(target_uri(&config), "http://localhost:50051");
    }

    #[test]
    fn endpoint_builds_for_plaintext_and_tls() {
        assert!(build_endpoint(&RpcEndpointConfig::new("localhost:50051")).is_ok());
        assert!(build_endpoint(&RpcEndpointConfig::new("products.internal:443")).is_ok());
    }

    #[test]
    fn backoff_doubles_but_never_exceeds_the_window() {
        let max = Duration::from_secs(5);
        assert_eq!(
            next_backoff(Duration::from_secs(1), max),
            Duration::from_secs(2)
        );
        assert_eq!(
            next_backoff(Duration::from_secs(4), max),
            Duration::from_secs(5)
        );
        assert_eq!(next_backoff(max, max), max);
    }

    #[tokio::test]
    async fn dial_gives_up_even_with_zero_initial_backoff() {
        // A zero delay must not spin forever; the attempt bound ends it.
        let mut config = RpcEndpointConfig::new("127.0.0.1:1");
        config.connect_timeout = Duration::from_millis(100);
        config.reconnect_initial = Duration::ZERO;
        config.reconnect_max = Duration::from_millis(5);
        let err = dial(&config).await.unwrap_err();
        assert!(matches!(err, CallError::Transport(_)));
    }
}
