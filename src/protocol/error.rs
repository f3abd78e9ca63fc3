//! Error types for agent invocations

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::codec::JsonRpcId;

/// Main error type for agent invocations
///
/// Only three kinds come back from the remote side: transport failures, timeouts and
/// undecodable bodies. A response that parses but has an unknown shape is not an error.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// Network failure or non-success HTTP status
    #[error("Transport error: {reason}")]
    Transport {
        /// Human-readable cause
        reason: String,

        /// HTTP status, when the server answered
        status: Option<u16>,

        /// Response body, when the server answered
        body: Option<String>,
    },

    /// The call did not complete before its deadline
    #[error("Request timed out after {after:?}")]
    Timeout { after: Duration },

    /// The response body could not be decoded at all
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The request could not be serialized
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Invalid invocation arguments (empty agent name or message)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InvocationError {
    /// Create a transport error without an HTTP response attached
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
            status: None,
            body: None,
        }
    }

    /// Create a transport error from a non-success HTTP response
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            reason: format!("HTTP {status}"),
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// Whether the deadline expired
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// HTTP status of a failed response, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Body of a failed response, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Transport { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

/// Reasons a response body could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty response body")]
    EmptyBody,

    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The response echoes an id other than the call's
    #[error("response id {actual} does not match request id {expected}")]
    IdMismatch { expected: JsonRpcId, actual: Value },
}

/// Result type alias for invocations
pub type InvocationResult<T> = Result<T, InvocationError>;
