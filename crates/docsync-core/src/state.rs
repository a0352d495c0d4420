//! Persistence of [`SyncState`] as a JSON blob inside the synced bucket.
//!
//! Known limitation: two engines sharing one bucket race on load/save and the
//! last save wins. Only one instance should run against a given state key.

use docsync_types::{StoreError, SyncState};
use std::sync::Arc;

use crate::error::{SyncError, SyncResult};
use crate::store::ObjectStore;

pub struct StateStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    key: String,
}

impl StateStore {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self { store, bucket: bucket.into(), key: key.into() }
    }

    /// Never fails: a missing or unreadable blob degrades to an empty state,
    /// which makes the next pass resync everything.
    pub async fn load(&self) -> SyncState {
        let bytes = match self.store.get_object(&self.bucket, &self.key).await {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound { .. }) => {
                tracing::info!("No existing manifest found, starting fresh");
                return SyncState::new();
            }
            Err(e) => {
                tracing::warn!("Failed to load manifest: {}", e);
                return SyncState::new();
            }
        };

        match SyncState::from_slice(&bytes) {
            Ok(state) => {
                tracing::info!("Loaded manifest with {} entries", state.len());
                state
            }
            Err(e) => {
                tracing::warn!("Manifest {} is corrupt, starting fresh: {}", self.key, e);
                SyncState::new()
            }
        }
    }

    pub async fn save(&self, state: &SyncState) -> SyncResult<()> {
        let body = state.to_pretty_json().map_err(|e| SyncError::StateEncoding(e.to_string()))?;
        self.store.put_object(&self.bucket, &self.key, body, "application/json").await?;
        tracing::info!("Saved manifest with {} entries", state.len());
        Ok(())
    }
}
