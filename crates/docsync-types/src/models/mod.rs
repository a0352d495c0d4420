//! Domain models shared by the client, the engine and the daemon.

pub mod config;
mod document;
mod object;
mod report;
mod routing;
mod state;

pub use config::{AppConfig, KnowledgeConfig, StoreConfig};
pub use document::RemoteDocument;
pub use object::ObjectRecord;
pub use report::{PlanAction, PlanEntry, SyncReport};
pub use routing::{RouteRule, RoutingTable};
pub use state::{SyncEntry, SyncState};
