//! Boundary error translation: any raised failure becomes a structured
//! error envelope without leaking internals for unexpected failures.

use serde::Serialize;
use serde_json::Value;

use crate::error::CallError;

/// One structured error as rendered to the eventual caller.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

/// The envelope the transport layer serializes: `{"errors": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ErrorObject>,
}

/// Classified boundary error. Each kind maps to a fixed status and title;
/// only `detail` varies per occurrence.
#[derive(Debug)]
pub enum ApiError {
    NotFound { detail: String, source: Option<Value> },

    Validation { detail: String, source: Option<Value> },

    Unauthorized { detail: String, source: Option<Value> },

    Internal { detail: String, source: Option<Value> },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { detail, .. }
            | Self::Validation { detail, .. }
            | Self::Unauthorized { detail, .. }
            | Self::Internal { detail, .. } => f.write_str(detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
            source: None,
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
            source: None,
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            detail: detail.into(),
            source: None,
        }
    }

    /// Generic internal failure. Carries no occurrence-specific detail so
    /// implementation internals never cross the service boundary.
    pub fn internal() -> Self {
        Self::Internal {
            detail: "Internal Server Error".into(),
            source: None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "404",
            Self::Validation { .. } => "422",
            Self::Unauthorized { .. } => "401",
            Self::Internal { .. } => "500",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Not Found",
            Self::Validation { .. } => "Validation Error",
            Self::Unauthorized { .. } => "Unauthorized",
            Self::Internal { .. } => "Internal Server Error",
        }
    }

    fn into_parts(self) -> (String, Option<Value>) {
        match self {
            Self::NotFound { detail, source }
            | Self::Validation { detail, source }
            | Self::Unauthorized { detail, source }
            | Self::Internal { detail, source } => (detail, source),
        }
    }

    /// Render as the serializable envelope, consumed exactly once.
    pub fn into_envelope(self) -> ErrorEnvelope {
        let status = self.status().to_owned();
        let title = self.title().to_owned();
        let (detail, source) = self.into_parts();
        ErrorEnvelope {
            errors: vec![ErrorObject {
                status,
                title,
                detail,
                source,
            }],
        }
    }
}

impl From<CallError> for ApiError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::RemoteClient { status: 401, detail } => Self::unauthorized(detail),
            CallError::RemoteClient { status: 404, detail } => Self::not_found(detail),
            CallError::RemoteClient { detail, .. } => Self::validation(detail),
            other => {
                tracing::error!(kind = other.kind(), error = %other, "unclassified call failure");
                Self::internal()
            }
        }
    }
}
