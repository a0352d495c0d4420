//! Typed error definitions for DocSync.
//!
//! Each external boundary gets its own error enum so callers can match on
//! the failure kind instead of inspecting strings:
//!
//! - [`ConfigError`] - startup configuration (the only fatal class)
//! - [`StoreError`] - object store listing, download and upload
//! - [`DocumentError`] - knowledge service list/create/update

mod config;
mod document;
mod store;

pub use config::ConfigError;
pub use document::DocumentError;
pub use store::StoreError;
