//! Error types for the chat core.
//!
//! Neither type ever reaches the conversation: rejected input is reported to
//! the caller only, and gateway failures are folded into sentinel text.

use reqwest::StatusCode;

/// Why a submission was refused. No state changes when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputRejected {
    #[error("message cannot be empty")]
    Empty,
    #[error("a request is already pending")]
    Pending,
    #[error("widget is closed")]
    Closed,
}

/// Failures talking to the remote model.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("provider returned {status}: {message}")]
    Provider { status: StatusCode, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::MalformedResponse(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::MalformedResponse(err.to_string())
    }
}
