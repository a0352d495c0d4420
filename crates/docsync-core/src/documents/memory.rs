use async_trait::async_trait;
use docsync_types::{DocumentError, RemoteDocument};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use super::DocumentService;

/// One call observed by [`InMemoryDocumentService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentCall {
    List { collection_id: String },
    Create { collection_id: String, name: String },
    Update { collection_id: String, document_id: String, name: String },
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<(RemoteDocument, String)>>,
    calls: Vec<DocumentCall>,
    failing_writes: HashSet<String>,
    failing_lists: HashSet<String>,
    next_id: usize,
}

/// Knowledge service double that keeps documents in memory and records every call.
#[derive(Default)]
pub struct InMemoryDocumentService {
    inner: Mutex<Inner>,
}

impl InMemoryDocumentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a document, returning its id.
    pub fn seed(&self, collection_id: &str, name: &str, text: &str) -> String {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = format!("doc-{}", inner.next_id);
        inner
            .collections
            .entry(collection_id.to_string())
            .or_default()
            .push((RemoteDocument::new(id.clone(), name), text.to_string()));
        id
    }

    /// Make create/update of `name` fail with a 500.
    pub fn fail_writes_for(&self, name: &str) {
        self.inner.lock().failing_writes.insert(name.to_string());
    }

    pub fn fail_list_for(&self, collection_id: &str) {
        self.inner.lock().failing_lists.insert(collection_id.to_string());
    }

    pub fn calls(&self) -> Vec<DocumentCall> {
        self.inner.lock().calls.clone()
    }

    pub fn writes(&self) -> Vec<DocumentCall> {
        self.calls().into_iter().filter(|c| !matches!(c, DocumentCall::List { .. })).collect()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, DocumentCall::List { .. })).count()
    }

    pub fn documents(&self, collection_id: &str) -> Vec<RemoteDocument> {
        self.inner
            .lock()
            .collections
            .get(collection_id)
            .map(|docs| docs.iter().map(|(d, _)| d.clone()).collect())
            .unwrap_or_default()
    }

    pub fn text_of(&self, collection_id: &str, name: &str) -> Option<String> {
        self.inner
            .lock()
            .collections
            .get(collection_id)
            .and_then(|docs| docs.iter().find(|(d, _)| d.name == name))
            .map(|(_, text)| text.clone())
    }
}

fn rejected(name: &str) -> DocumentError {
    DocumentError::Status { status: 500, message: format!("write rejected for {name}") }
}

#[async_trait]
impl DocumentService for InMemoryDocumentService {
    async fn list_documents(
        &self,
        collection_id: &str,
    ) -> Result<Vec<RemoteDocument>, DocumentError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DocumentCall::List { collection_id: collection_id.to_string() });
        if inner.failing_lists.contains(collection_id) {
            return Err(DocumentError::Unavailable { message: "listing failed".to_string() });
        }
        Ok(inner
            .collections
            .get(collection_id)
            .map(|docs| docs.iter().map(|(d, _)| d.clone()).collect())
            .unwrap_or_default())
    }

    async fn create_document(
        &self,
        collection_id: &str,
        name: &str,
        text: &str,
    ) -> Result<RemoteDocument, DocumentError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DocumentCall::Create {
            collection_id: collection_id.to_string(),
            name: name.to_string(),
        });
        if inner.failing_writes.contains(name) {
            return Err(rejected(name));
        }
        inner.next_id += 1;
        let doc = RemoteDocument::new(format!("doc-{}", inner.next_id), name);
        inner
            .collections
            .entry(collection_id.to_string())
            .or_default()
            .push((doc.clone(), text.to_string()));
        Ok(doc)
    }

    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        name: &str,
        text: &str,
    ) -> Result<RemoteDocument, DocumentError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DocumentCall::Update {
            collection_id: collection_id.to_string(),
            document_id: document_id.to_string(),
            name: name.to_string(),
        });
        if inner.failing_writes.contains(name) {
            return Err(rejected(name));
        }
        let entry = inner
            .collections
            .get_mut(collection_id)
            .and_then(|docs| docs.iter_mut().find(|(d, _)| d.id == document_id))
            .ok_or_else(|| DocumentError::Status {
                status: 404,
                message: format!("document {document_id} not found"),
            })?;
        entry.0.name = name.to_string();
        entry.1 = text.to_string();
        Ok(entry.0.clone())
    }
}
