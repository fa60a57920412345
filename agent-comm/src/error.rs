//! Unified error types for agent-comm.
//!
//! Failures from the external collaborators (the chat API, the middleware
//! bus) are wrapped but never swallowed: every error propagates to the
//! caller with its source preserved.

use std::fmt;

/// Result type alias for agent-comm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the agent-comm crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Vision-language model error.
    #[error("VLM error: {0}")]
    Vlm(#[from] VlmError),

    /// Middleware bus error.
    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error type for VLM chat-completion operations.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct VlmError {
    /// The error kind.
    pub kind: VlmErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Optional error code reported by the provider.
    pub code: Option<String>,
}

/// Categories of VLM errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum VlmErrorKind {
    /// Authentication or authorization failure.
    Auth,
    /// The supplied image payload is not valid base64 text.
    InvalidImage,
    /// Response format error.
    ResponseFormat,
    /// HTTP status error without a parseable provider envelope.
    HttpStatus,
    /// Provider-reported error.
    Provider,
    /// Internal error.
    Internal,
}

impl VlmError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            kind: VlmErrorKind::Auth,
            message: message.into(),
            code: None,
        }
    }

    /// Create an invalid image payload error.
    #[must_use]
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self {
            kind: VlmErrorKind::InvalidImage,
            message: message.into(),
            code: None,
        }
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self {
            kind: VlmErrorKind::ResponseFormat,
            message: format!("expected {}, got {}", expected.into(), got.into()),
            code: None,
        }
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: VlmErrorKind::HttpStatus,
            message: format!("HTTP {status}: {}", body.into()),
            code: Some(status.to_string()),
        }
    }

    /// Create a provider error with an error code.
    #[must_use]
    pub fn provider_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: VlmErrorKind::Provider,
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: VlmErrorKind::Internal,
            message: message.into(),
            code: None,
        }
    }
}

impl fmt::Display for VlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code: {code})")?;
        }
        Ok(())
    }
}

impl std::error::Error for VlmError {}

/// Error type for middleware bus operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BusError {
    /// Failed to reach the bridge endpoint.
    #[error("failed to connect to bus at {url}: {source}")]
    Connect {
        /// The websocket URL that was dialed.
        url: String,
        /// The underlying handshake failure.
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    /// Transport failure on an established session.
    #[error("bus transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// The session closed before a response arrived.
    #[error("bus connection closed before the service responded")]
    Closed,

    /// A frame from the bridge could not be interpreted.
    #[error("bus protocol error: {0}")]
    Protocol(String),

    /// The bridge reported the call failed (unknown or erroring service).
    #[error("service call to {service} failed: {detail}")]
    Call {
        /// The service name that was called.
        service: String,
        /// Failure detail reported by the bridge.
        detail: String,
    },
}
