//! Error types for the DevOps API client.
//!
//! # Design
//! Every failure is returned as an `ApiError`; nothing is retried or
//! swallowed. `NotFound` gets a dedicated variant because callers driving a
//! reconcile loop must tell "the resource is gone" apart from "the service
//! is unreachable" and "the service answered with garbage". All other
//! non-2xx responses land in `Remote` with the raw status code and body.

use thiserror::Error;

/// Boxed cause of a transport-level failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `DevOpsClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained: connection refused, DNS failure, timeout,
    /// or the body could not be read.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a status outside `[200, 300)` other than 404.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// The resource does not exist. `status` is `Some(404)` when the server
    /// said so, `None` when a list scan found no match.
    #[error("resource not found: {detail}")]
    NotFound { status: Option<u16>, detail: String },

    /// The response body is malformed or structurally incomplete.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Coarse classification of an `ApiError`, for presentation layers that
/// render diagnostics without matching on every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Remote,
    NotFound,
    Decode,
    Encode,
}

impl ApiError {
    pub(crate) fn transport<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        ApiError::Transport(cause.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Remote { .. } => ErrorKind::Remote,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Encode(_) => ErrorKind::Encode,
        }
    }

    /// HTTP status of the response that caused the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            ApiError::NotFound { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }
}

/// Errors raised while resolving a `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing DevOps API endpoint: set it explicitly or via {0}")]
    MissingEndpoint(&'static str),

    #[error("invalid DevOps API endpoint {0:?}: expected an http:// or https:// URL")]
    InvalidEndpoint(String),
}
