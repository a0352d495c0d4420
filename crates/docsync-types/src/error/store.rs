//! Object store errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by an object store adapter.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum StoreError {
    /// The requested key does not exist in the bucket
    #[error("Object not found: {key}")]
    NotFound { key: String },

    /// Store unreachable (connect error, timeout, DNS)
    #[error("Object store unavailable: {message}")]
    Unavailable { message: String },

    /// Store answered with a non-success status
    #[error("Object store returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("Invalid object store response: {message}")]
    InvalidResponse { message: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
