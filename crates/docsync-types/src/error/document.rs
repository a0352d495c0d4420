//! Knowledge service errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by a document service adapter.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum DocumentError {
    /// Service unreachable (connect error, timeout)
    #[error("Document service unavailable: {message}")]
    Unavailable { message: String },

    /// Service answered with a non-success status
    #[error("Document service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Rate limited and retries exhausted
    #[error("Rate limited by document service after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Response body could not be interpreted
    #[error("Invalid document service response: {message}")]
    InvalidResponse { message: String },
}
