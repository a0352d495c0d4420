//! # DocSync Types
//!
//! Core types, models, and error definitions for DocSync.
//!
//! - **`error`** - Typed error hierarchy for configuration, object store and document service
//! - **`models`** - Domain models (objects, sync state, routing, remote documents, config)
//!
//! ## Architecture Role
//!
//! ```text
//!                 docsync-types (this crate)
//!                        │
//!          ┌─────────────┼─────────────┐
//!          ▼             ▼             ▼
//!   docsync-client  docsync-core  docsync-server
//! ```
//!
//! All types are serializable via serde and cheap to clone across async boundaries.

pub mod error;
pub mod models;

pub use error::{ConfigError, DocumentError, StoreError};

pub use models::{
    AppConfig, KnowledgeConfig, ObjectRecord, PlanAction, PlanEntry, RemoteDocument, RouteRule,
    RoutingTable, StoreConfig, SyncEntry, SyncReport, SyncState,
};
