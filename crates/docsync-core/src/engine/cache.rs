//! Per-pass cache of collection document indexes.

use docsync_types::DocumentError;
use std::collections::HashMap;

use crate::documents::DocumentService;

/// Document name → document id for one collection.
pub type CollectionIndex = HashMap<String, String>;

/// Lazily fetched indexes, one listing call per collection per pass.
///
/// Write-through: documents created during the pass are inserted so a later
/// object with the same name updates instead of creating a duplicate. A failed
/// listing is not cached; the next object routed there retries it.
#[derive(Debug, Default)]
pub struct DocumentIndexCache {
    indexes: HashMap<String, CollectionIndex>,
}

impl DocumentIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn index_for(
        &mut self,
        collection_id: &str,
        documents: &dyn DocumentService,
    ) -> Result<&mut CollectionIndex, DocumentError> {
        if !self.indexes.contains_key(collection_id) {
            let listed = documents.list_documents(collection_id).await?;
            tracing::debug!(
                collection_id,
                documents = listed.len(),
                "Fetched collection index"
            );
            let index = listed.into_iter().map(|doc| (doc.name, doc.id)).collect();
            self.indexes.insert(collection_id.to_string(), index);
        }
        Ok(self.indexes.entry(collection_id.to_string()).or_default())
    }

    pub fn cached_collections(&self) -> usize {
        self.indexes.len()
    }
}
