//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// A required credential is absent or empty
    #[error("{name} is required")]
    MissingCredential {
        /// Environment variable or config field that must be set
        name: String,
    },

    /// Config file could not be read
    #[error("Config not readable at {path}: {message}")]
    NotReadable {
        /// Filesystem path of the config file
        path: String,
        /// Underlying I/O failure
        message: String,
    },

    /// Config file parse error (JSON)
    #[error("Config parse error: {message}")]
    ParseError {
        /// Description of the parse failure
        message: String,
    },

    /// Config validation error (invalid values)
    #[error("Config validation error for {field}: {message}")]
    ValidationError {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingCredential { name: name.into() }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError { field: field.into(), message: message.into() }
    }

    /// True for errors that must abort startup with a non-zero exit.
    pub fn is_fatal_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}
