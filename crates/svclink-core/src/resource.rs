//! The `ResourceClient` trait — the capability contract for remote lookups.

use async_trait::async_trait;

use crate::error::CallError;

/// Opaque identifier propagated across call boundaries to correlate logs for
/// one logical request. Supplied by the inbound-request layer; this core
/// propagates it and never generates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceToken(String);

impl TraceToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TraceToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TraceToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Outcome of an existence check: a boolean plus the resource when the remote
/// chooses to include it.
#[derive(Debug, Clone)]
pub struct Existence<T> {
    pub exists: bool,
    pub resource: Option<T>,
}

/// The capability every remote-resource client implements.
///
/// Absence is a first-class return value: `fetch` resolves to `Ok(None)` when
/// the resource does not exist, and only transport/remote failures surface as
/// [`CallError`].
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks; the
/// trait is object-safe once `Resource` is fixed, so the business layer can
/// hold `Arc<dyn ResourceClient<Resource = R>>`.
#[async_trait]
pub trait ResourceClient: Send + Sync + 'static {
    type Resource;

    /// Fetch a resource by identifier, propagating the trace token.
    async fn fetch(
        &self,
        id: &str,
        trace: Option<&TraceToken>,
    ) -> Result<Option<Self::Resource>, CallError>;

    /// Check whether a resource exists without raising on absence.
    async fn exists(&self, id: &str) -> Result<Existence<Self::Resource>, CallError>;

    /// Release any held connection. Idempotent.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_token_round_trip() {
        let token = TraceToken::from("req-abc-123");
        assert_eq!(token.as_str(), "req-abc-123");
        assert_eq!(token.to_string(), "req-abc-123");
    }
}
