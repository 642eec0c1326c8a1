//! Error types for the shopdesk client.
//!
//! The taxonomy distinguishes three classes of failure:
//!
//! - [`AuthError`]: the session is unusable: invalid credentials, or a
//!   refresh token that is missing or was rejected. Terminal for the
//!   current session.
//! - API-level errors ([`ApiError::Api`]): the server answered with a
//!   non-success status on a resource call. No session impact.
//! - Transport/decoding errors: the network or the response body failed.
//!   No session impact.

use thiserror::Error;

/// The main error type for shopdesk client operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failure; the current session cannot continue.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The server answered with a non-success status.
    #[error("request failed (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or a generic fallback.
        message: String,
    },

    /// Network-level failure (connection, timeout, TLS, ...).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using ApiError.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check whether this error tore down the session.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// The HTTP status code, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Session-terminal authentication failure.
///
/// Clonable so a single refresh failure can be fanned out to every caller
/// queued on the in-flight refresh cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login was rejected by the server.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A call came back unauthorized and there is no token pair to refresh with.
    #[error("unauthorized: {0}")]
    MissingCredentials(String),

    /// The refresh call itself failed; the session is exhausted.
    #[error("refresh rejected: {0}")]
    RefreshExhausted(String),

    /// The retried call was still unauthorized after a successful refresh.
    #[error("unauthorized after refresh: {0}")]
    Unauthorized(String),
}

impl AuthError {
    /// Whether this failure came out of the refresh path.
    pub fn is_refresh_exhausted(&self) -> bool {
        matches!(self, Self::RefreshExhausted(_))
    }
}

/// Network-level failure, independent of any HTTP status.
#[derive(Error, Debug)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Whether the request timed out.
    pub is_timeout: bool,
    /// Whether the connection itself failed.
    pub is_connect: bool,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_timeout {
            write!(f, "request timed out: {}", self.message)
        } else if self.is_connect {
            write!(f, "connection failed: {}", self.message)
        } else {
            write!(f, "transport error: {}", self.message)
        }
    }
}

impl TransportError {
    /// Create a plain transport error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_timeout: false,
            is_connect: false,
        }
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_timeout: true,
            is_connect: false,
        }
    }

    /// Create a connection error.
    pub fn connect(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_timeout: false,
            is_connect: true,
        }
    }
}
