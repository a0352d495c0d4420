//! # DocSync Core
//!
//! One-directional reconciliation of an object store bucket into a
//! knowledge service's document collections.
//!
//! ```text
//! docsync-core/src/
//! ├── router.rs      # prefix → collection (first match wins)
//! ├── detector.rs    # fingerprint comparison against persisted state
//! ├── filter.rs      # which listed objects are sync candidates
//! ├── engine/        # single pass: enumerate, route, download, create-or-update
//! ├── state.rs       # load/save of the state blob through the object store
//! ├── store/         # ObjectStore trait, S3 (SigV4) and in-memory implementations
//! ├── documents/     # DocumentService trait, HTTP and in-memory implementations
//! └── config.rs      # AppConfig loading (file + environment) and validation
//! ```

pub mod config;
pub mod detector;
pub mod documents;
pub mod engine;
pub mod error;
pub mod filter;
pub mod router;
pub mod state;
pub mod store;

pub use documents::{DocumentService, InMemoryDocumentService};
pub use engine::Engine;
pub use error::{SyncError, SyncResult};
pub use router::Router;
pub use state::StateStore;
pub use store::{InMemoryObjectStore, ObjectStore, S3Store};
