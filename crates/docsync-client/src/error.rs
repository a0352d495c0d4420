//! Error types for the knowledge client.

use docsync_types::DocumentError;
use thiserror::Error;

/// Errors that can occur when using the knowledge client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an invalid or unparseable response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server returned 429 Too Many Requests.
    #[error("Rate limited (429): retry after {retry_after:?}s")]
    RateLimited {
        /// Seconds to wait before retrying, if provided by server.
        retry_after: Option<u64>,
    },

    /// Server returned a non-success status.
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Error message from server.
        message: String,
    },

    /// Transient failures persisted past the retry budget.
    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ClientError>,
    },
}

impl ClientError {
    /// Whether a retry may succeed (429, 5xx, connect/timeout failures).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::ServerError { status, .. } => *status >= 500,
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::InvalidResponse(_) | Self::RetriesExhausted { .. } => false,
        }
    }

    /// The service provably did not act on the request: it was refused with
    /// 429 or the connection was never established.
    pub fn is_undelivered(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Request(e) => e.is_connect(),
            _ => false,
        }
    }
}

impl From<ClientError> for DocumentError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) => Self::Unavailable { message: e.to_string() },
            ClientError::InvalidResponse(message) => Self::InvalidResponse { message },
            ClientError::RateLimited { .. } => Self::RateLimited { attempts: 1 },
            ClientError::ServerError { status, message } => Self::Status { status, message },
            ClientError::RetriesExhausted { attempts, last } => match *last {
                ClientError::RateLimited { .. } => Self::RateLimited { attempts },
                other => Self::from(other),
            },
        }
    }
}
