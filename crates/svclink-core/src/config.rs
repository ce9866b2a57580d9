//! Immutable endpoint configuration, created once at process startup and
//! shared read-only across all calls.

use std::time::Duration;

/// Configuration for the retrying HTTP transport client.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Base address of the dependency, e.g. `http://products:8000`.
    pub base_url: String,
    /// API key injected as a header on every outbound call.
    pub api_key: String,
    /// Overall per-request timeout.
    pub timeout: Duration,
    /// Connection-establishment timeout, tighter than `timeout`.
    pub connect_timeout: Duration,
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Backoff unit: attempt `k` (0-indexed) waits `2^k` units.
    pub backoff_unit: Duration,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            max_retries: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

/// Configuration for the connection-managed RPC client.
#[derive(Debug, Clone)]
pub struct RpcEndpointConfig {
    /// Target in `host:port` form, no scheme.
    pub target: String,
    /// Force a TLS channel. Port 443 enables TLS regardless of this flag.
    pub use_tls: bool,
    /// Per-call deadline, independent of any transport default.
    pub timeout: Duration,
    /// Channel dial timeout.
    pub connect_timeout: Duration,
    /// HTTP/2 keep-alive ping interval (pings permitted while idle).
    pub keepalive_interval: Duration,
    /// How long to wait for a keep-alive ping ack before the channel is
    /// considered dead.
    pub keepalive_timeout: Duration,
    /// Reconnect backoff starting delay.
    pub reconnect_initial: Duration,
    /// Maximum reconnect backoff delay.
    pub reconnect_max: Duration,
    /// Cap on encoded/decoded message size.
    pub max_message_bytes: usize,
}

impl RpcEndpointConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            use_tls: false,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            keepalive_interval: Duration::from_secs(30),
            keepalive_timeout: Duration::from_secs(10),
            reconnect_initial: Duration::from_secs(1),
            reconnect_max: Duration::from_secs(5),
            max_message_bytes: 10 * 1024 * 1024,
        }
    }

    /// TLS is selected when explicitly requested or when the target port is
    /// the well-known secure port.
    pub fn tls_enabled(&self) -> bool {
        self.use_tls || self.target.ends_with(":443")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tls_auto_detected_for_port_443() {
        let config = RpcEndpointConfig::new("products.internal:443");
        assert!(!config.use_tls);
        assert!(config.tls_enabled());
    }

    #[test]
    fn plaintext_for_other_ports() {
        let config = RpcEndpointConfig::new("localhost:50051");
        assert!(!config.tls_enabled());
    }

    #[test]
    fn explicit_flag_wins_over_port() {
        let mut config = RpcEndpointConfig::new("localhost:50051");
        config.use_tls = true;
        assert!(config.tls_enabled());
    }

    #[test]
    fn http_defaults() {
        let config = EndpointConfig::new("http://products:8000", "secret");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.backoff_unit, Duration::from_secs(1));
    }
}
