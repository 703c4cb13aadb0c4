//! Error types for the connector.
//!
//! Failures are kept on separate channels so callers can tell "could not
//! reach the provider" apart from "the provider rejected the request":
//! transport failures wrap the underlying I/O error verbatim, provider
//! rejections carry the parsed error payload, and bodies that fail to parse
//! as JSON are a protocol violation of their own.

use std::fmt;

use crate::auth::types::ProviderErrorPayload;

/// Standard result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Failure raised by the request-execution layer: the provider could not be
/// reached at all (connection error, timeout, TLS failure).
///
/// Carries an optional source error so production executors can forward the
/// underlying `reqwest` error while test doubles fabricate failures from a
/// plain message.
#[derive(Debug)]
pub struct TransportError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Create a transport error from a plain message (no underlying source).
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: None }
    }

    /// The human-readable failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failure: {}", self.message)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            Some(err) => Some(err.as_ref()),
            None => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

/// Error type for connector operations
#[derive(Debug)]
pub enum ConnectorError {
    /// Required client configuration is missing or malformed
    Config {
        /// What is wrong with the configuration
        message: String,
        /// The offending field, when one can be named
        field: Option<String>,
    },

    /// The provider could not be reached (network, timeout)
    Transport(TransportError),

    /// The provider answered with a non-success status and a structured
    /// error payload
    Provider {
        /// HTTP status of the rejection
        status: u16,
        /// Parsed JSON error body
        payload: ProviderErrorPayload,
    },

    /// A response body failed to parse as JSON where JSON was expected
    Protocol(String),

    /// The `state` echoed by the callback does not match the pending
    /// handshake (CSRF)
    StateMismatch {
        /// The state issued when the authorization URL was built
        expected: String,
        /// The state carried by the callback
        received: String,
    },
}

impl ConnectorError {
    /// Configuration error without a named field.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), field: None }
    }

    /// Configuration error naming the offending field.
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config { message: message.into(), field: Some(field.into()) }
    }
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message, field: Some(field) } => {
                write!(f, "configuration error ({field}): {message}")
            }
            Self::Config { message, field: None } => {
                write!(f, "configuration error: {message}")
            }
            Self::Transport(e) => write!(f, "{e}"),
            Self::Provider { status, payload } => {
                write!(f, "provider rejected the request (HTTP {status}): {payload}")
            }
            Self::Protocol(msg) => write!(f, "protocol violation: {msg}"),
            Self::StateMismatch { expected, received } => {
                write!(f, "state mismatch (CSRF): expected {expected}, received {received}")
            }
        }
    }
}

impl std::error::Error for ConnectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for ConnectorError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}
