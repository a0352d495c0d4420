//! Reconciliation engine.
//!
//! One pass:
//! 1. load the persisted state (missing/corrupt → empty)
//! 2. enumerate candidates (state blob, markers and unsupported suffixes dropped)
//! 3. per object, in listing order: skip if unchanged, route, download, decode,
//!    look up the collection index, then update or create
//! 4. save the state, whatever the number of failures
//!
//! A single object's failure never aborts the pass. Only the object listing
//! itself can fail a pass.

mod cache;

pub use cache::{CollectionIndex, DocumentIndexCache};

use chrono::Utc;
use docsync_types::{AppConfig, ObjectRecord, PlanAction, PlanEntry, SyncEntry, SyncReport};
use std::sync::Arc;

use crate::detector;
use crate::documents::DocumentService;
use crate::error::{SyncError, SyncResult};
use crate::filter::CandidateFilter;
use crate::router::Router;
use crate::state::StateStore;
use crate::store::ObjectStore;

/// How a successfully synced object reached its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Created,
    Updated,
}

pub struct Engine {
    store: Arc<dyn ObjectStore>,
    documents: Arc<dyn DocumentService>,
    bucket: String,
    router: Router,
    filter: CandidateFilter,
    state: StateStore,
}

impl Engine {
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn ObjectStore>,
        documents: Arc<dyn DocumentService>,
    ) -> Self {
        let bucket = config.store.bucket.clone();
        let state_key = config.store.state_key.clone();
        Self {
            state: StateStore::new(store.clone(), bucket.clone(), state_key.clone()),
            filter: CandidateFilter::new(state_key, &config.extensions),
            router: Router::new(config.routes.clone()),
            store,
            documents,
            bucket,
        }
    }

    /// Run one full reconciliation pass.
    ///
    /// Returns `Err` only when the bucket cannot be enumerated; every
    /// per-object failure is counted in [`SyncReport::failed`].
    pub async fn run_pass(&self) -> SyncResult<SyncReport> {
        tracing::info!("Starting sync cycle...");
        let mut report = SyncReport::begin();
        let mut state = self.state.load().await;

        let objects = self.candidates().await?;
        tracing::info!("Found {} objects to process", objects.len());

        let mut cache = DocumentIndexCache::new();

        for object in &objects {
            if detector::is_unchanged(&object.key, &object.fingerprint, &state) {
                tracing::debug!(key = %object.key, "Skipping (unchanged)");
                report.skipped += 1;
                continue;
            }

            let outcome = match self.router.route(&object.key) {
                Some(collection_id) => self
                    .sync_object(object, collection_id, &mut cache)
                    .await
                    .map(|kind| (kind, collection_id)),
                None => Err(SyncError::NoRoute { key: object.key.clone() }),
            };

            match outcome {
                Ok((kind, collection_id)) => {
                    match kind {
                        WriteKind::Created => report.created += 1,
                        WriteKind::Updated => report.updated += 1,
                    }
                    report.synced += 1;
                    state.record(
                        object.key.clone(),
                        SyncEntry::new(object.fingerprint.clone(), collection_id),
                    );
                }
                Err(e) if e.is_policy_skip() => {
                    tracing::warn!(key = %object.key, "Skipping: {}", e);
                    report.failed += 1;
                }
                Err(e) => {
                    tracing::error!(key = %object.key, "Failed to sync: {}", e);
                    report.failed += 1;
                }
            }
        }

        match self.state.save(&state).await {
            Ok(()) => report.state_saved = true,
            Err(e) => tracing::error!("Failed to save manifest: {}", e),
        }

        report.finished_at = Utc::now();
        tracing::info!(
            "Sync complete: {} synced, {} skipped, {} failed",
            report.synced,
            report.skipped,
            report.failed
        );
        Ok(report)
    }

    /// Classify every candidate without downloading content or writing anything.
    pub async fn plan(&self) -> SyncResult<Vec<PlanEntry>> {
        let state = self.state.load().await;
        let objects = self.candidates().await?;

        Ok(objects
            .into_iter()
            .map(|object| {
                let action = if detector::is_unchanged(&object.key, &object.fingerprint, &state) {
                    PlanAction::Skip
                } else {
                    PlanAction::Sync
                };
                let collection_id = self.router.route(&object.key).map(str::to_string);
                PlanEntry { key: object.key, action, collection_id }
            })
            .collect())
    }

    async fn candidates(&self) -> SyncResult<Vec<ObjectRecord>> {
        let listed = self.store.list_objects(&self.bucket).await?;
        Ok(listed.into_iter().filter(|o| self.filter.is_candidate(o)).collect())
    }

    async fn sync_object(
        &self,
        object: &ObjectRecord,
        collection_id: &str,
        cache: &mut DocumentIndexCache,
    ) -> SyncResult<WriteKind> {
        let bytes = self.store.get_object(&self.bucket, &object.key).await?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| SyncError::Decode { key: object.key.clone() })?;

        let index = cache.index_for(collection_id, self.documents.as_ref()).await?;

        if let Some(document_id) = index.get(&object.key).cloned() {
            tracing::info!(key = %object.key, collection_id, "Updating");
            self.documents.update_document(collection_id, &document_id, &object.key, text).await?;
            Ok(WriteKind::Updated)
        } else {
            tracing::info!(key = %object.key, collection_id, "Creating");
            let created =
                self.documents.create_document(collection_id, &object.key, text).await?;
            index.insert(object.key.clone(), created.id);
            Ok(WriteKind::Created)
        }
    }
}
