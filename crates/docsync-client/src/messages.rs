//! Request and response bodies of the dataset API.

use docsync_types::RemoteDocument;
use serde::{Deserialize, Serialize};

/// Segmentation rule; the service picks chunking parameters itself.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProcessRule {
    pub mode: &'static str,
}

impl ProcessRule {
    pub const fn automatic() -> Self {
        Self { mode: "automatic" }
    }
}

/// Body of `POST /datasets/{id}/document/create-by-text`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateByTextRequest<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub indexing_technique: &'a str,
    pub process_rule: ProcessRule,
}

/// Body of `POST /datasets/{id}/documents/{doc_id}/update-by-text`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateByTextRequest<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub process_rule: ProcessRule,
}

/// One page of `GET /datasets/{id}/documents`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentPage {
    #[serde(default)]
    pub data: Vec<RemoteDocument>,
    #[serde(default)]
    pub has_more: bool,
    pub total: Option<u64>,
    pub page: Option<u32>,
}

/// Response of create/update: the affected document plus the indexing batch id.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResponse {
    pub document: RemoteDocument,
    #[serde(default)]
    pub batch: Option<String>,
}
