//! # Errors
//!
//! - **[`RpcError`]**: The server was reached and answered with a non-200 status. Always
//!   carries the service and method that failed.
//! - **[`CallError`]**: The call could not be completed: bad configuration, transport failure,
//!   or a body that could not be decoded. Never wraps an [`RpcError`].
//! - **[`CodecError`]**: JSON encoding or decoding failed.
use crate::BoxError;
use http::StatusCode;

/// Message used when a failed response carries no string `message` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// An application-level failure reported by the remote service.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{service}.{method} failed with status {status}: '{message}'")]
pub struct RpcError {
    /// The failure reason sent by the server, or [`UNKNOWN_ERROR_MESSAGE`].
    pub message: String,
    pub service: String,
    pub method: String,
    /// HTTP status of the failed response, so callers can branch without string matching.
    pub status: StatusCode,
}

impl RpcError {
    pub fn new(
        message: impl Into<String>,
        service: impl Into<String>,
        method: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            message: message.into(),
            service: service.into(),
            method: method.into(),
            status,
        }
    }

    /// `true` when the server rejected the call with `401 Unauthorized`.
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode payload as JSON: '{0}'")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode JSON payload: '{0}'")]
    Decode(#[source] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CallError {
    #[error("Invalid url '{url}' provided: '{source}'")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Invalid header key '{key}': '{source}'")]
    InvalidHeaderName {
        key: String,
        source: http::header::InvalidHeaderName,
    },
    #[error("Invalid header value for key '{key}': '{source}'")]
    InvalidHeaderValue {
        key: String,
        source: http::header::InvalidHeaderValue,
    },
    #[error("Failed to build the HTTP request: '{0}'")]
    InvalidRequest(#[source] http::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("Transport error: '{0}'")]
    Transport(#[source] BoxError),
    #[error("Output of {service}.{method} does not match the expected type: '{source}'")]
    UnexpectedOutput {
        service: String,
        method: String,
        source: serde_json::Error,
    },
}
