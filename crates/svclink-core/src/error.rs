//! Failure taxonomy for outbound calls.

use thiserror::Error;

/// Errors that can occur during an outbound service-to-service call.
///
/// Absence of a resource is never an error — clients signal it with
/// `Ok(None)` so callers can render "not found" instead of a 500-class
/// failure.
#[derive(Debug, Error)]
pub enum CallError {
    /// Connection-level fault (refused, reset, DNS failure).
    #[error("transport fault: {0}")]
    Transport(String),

    /// The call exceeded its configured deadline.
    #[error("call timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The remote rejected the request with a 4xx status — the request
    /// itself is invalid, never retried.
    #[error("remote rejected request ({status}): {detail}")]
    RemoteClient { status: u16, detail: String },

    /// The remote failed with a 5xx status.
    #[error("remote server error ({status}): {detail}")]
    RemoteServer { status: u16, detail: String },

    /// An RPC call failed with a non-absence status.
    #[error("rpc call for {id} failed ({code}): {detail}")]
    Rpc {
        id: String,
        code: String,
        detail: String,
    },

    /// Anything we could not classify.
    #[error("{0}")]
    Unexpected(String),
}

impl CallError {
    /// Classify an inspected HTTP status into the matching variant.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        if status >= 500 {
            Self::RemoteServer {
                status,
                detail: detail.into(),
            }
        } else {
            Self::RemoteClient {
                status,
                detail: detail.into(),
            }
        }
    }

    /// Returns `true` if this failure is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::RemoteServer { .. }
        )
    }

    /// Short stable name for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Timeout { .. } => "timeout",
            Self::RemoteClient { .. } => "remote-client",
            Self::RemoteServer { .. } => "remote-server",
            Self::Rpc { .. } => "rpc",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_splits_on_500() {
        assert!(matches!(
            CallError::from_status(503, "unavailable"),
            CallError::RemoteServer { status: 503, .. }
        ));
        assert!(matches!(
            CallError::from_status(422, "bad payload"),
            CallError::RemoteClient { status: 422, .. }
        ));
    }

    #[test]
    fn retryable_classes() {
        assert!(CallError::Transport("refused".into()).is_retryable());
        assert!(CallError::Timeout { ms: 30_000 }.is_retryable());
        assert!(CallError::from_status(500, "").is_retryable());
        assert!(!CallError::from_status(400, "").is_retryable());
        assert!(!CallError::Rpc {
            id: "p1".into(),
            code: "Internal".into(),
            detail: "boom".into(),
        }
        .is_retryable());
    }

    #[test]
    fn rpc_failure_names_the_identifier() {
        let err = CallError::Rpc {
            id: "prod-42".into(),
            code: "Internal".into(),
            detail: "backend exploded".into(),
        };
        assert!(err.to_string().contains("prod-42"));
    }
}
