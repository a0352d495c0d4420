//! Unified error type for the reconciliation engine.

use docsync_types::{ConfigError, DocumentError, StoreError};
use thiserror::Error;

/// Failure of one object's sync, or of a whole pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncError {
    /// Object store listing, download or upload failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Knowledge service list/create/update failed.
    #[error("Document service error: {0}")]
    Document(#[from] DocumentError),

    /// Configuration invalid or incomplete.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Object content is not valid UTF-8 text.
    #[error("Not a text file: {key}")]
    Decode { key: String },

    /// No routing prefix matches the object key.
    #[error("No dataset routing for key: {key}")]
    NoRoute { key: String },

    /// State blob could not be serialized.
    #[error("State encoding failed: {0}")]
    StateEncoding(String),
}

impl SyncError {
    /// Routing misses and binary content are policy skips, logged at warn.
    pub fn is_policy_skip(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::NoRoute { .. })
    }
}

/// Result type alias for engine operations.
pub type SyncResult<T> = Result<T, SyncError>;
