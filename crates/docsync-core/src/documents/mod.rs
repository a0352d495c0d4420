//! Document service capability: list, create, update within a collection.

mod memory;

pub use memory::{DocumentCall, InMemoryDocumentService};

use async_trait::async_trait;
use docsync_client::KnowledgeClient;
use docsync_types::{DocumentError, RemoteDocument};

#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Every document in the collection (all pages).
    async fn list_documents(&self, collection_id: &str)
        -> Result<Vec<RemoteDocument>, DocumentError>;

    async fn create_document(
        &self,
        collection_id: &str,
        name: &str,
        text: &str,
    ) -> Result<RemoteDocument, DocumentError>;

    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        name: &str,
        text: &str,
    ) -> Result<RemoteDocument, DocumentError>;
}

#[async_trait]
impl DocumentService for KnowledgeClient {
    async fn list_documents(
        &self,
        collection_id: &str,
    ) -> Result<Vec<RemoteDocument>, DocumentError> {
        Ok(KnowledgeClient::list_documents(self, collection_id).await?)
    }

    async fn create_document(
        &self,
        collection_id: &str,
        name: &str,
        text: &str,
    ) -> Result<RemoteDocument, DocumentError> {
        Ok(self.create_by_text(collection_id, name, text).await?.document)
    }

    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        name: &str,
        text: &str,
    ) -> Result<RemoteDocument, DocumentError> {
        Ok(self.update_by_text(collection_id, document_id, name, text).await?.document)
    }
}
