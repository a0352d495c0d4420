//! `ListObjectsV2` response parsing.

use chrono::{DateTime, Utc};
use docsync_types::{ObjectRecord, StoreError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ListBucketResult {
    #[serde(rename = "Contents", default)]
    pub contents: Vec<ListedObject>,
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    #[serde(rename = "NextContinuationToken")]
    pub next_continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListedObject {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "ETag", default)]
    pub etag: String,
    #[serde(rename = "Size", default)]
    pub size: u64,
    #[serde(rename = "LastModified")]
    pub last_modified: DateTime<Utc>,
}

impl From<ListedObject> for ObjectRecord {
    fn from(obj: ListedObject) -> Self {
        Self {
            key: obj.key,
            fingerprint: obj.etag.trim_matches('"').to_string(),
            size: obj.size,
            last_modified: obj.last_modified,
        }
    }
}

pub(crate) fn parse(xml: &str) -> Result<ListBucketResult, StoreError> {
    quick_xml::de::from_str(xml)
        .map_err(|e| StoreError::InvalidResponse { message: format!("ListObjectsV2: {e}") })
}
