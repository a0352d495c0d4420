use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted record of one successful sync.
///
/// Field names on disk (`etag`, `dataset_id`) are kept stable so existing
/// manifests remain readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncEntry {
    #[serde(rename = "etag")]
    pub fingerprint: String,
    pub synced_at: DateTime<Utc>,
    #[serde(rename = "dataset_id")]
    pub collection_id: String,
}

impl SyncEntry {
    pub fn new(fingerprint: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            synced_at: Utc::now(),
            collection_id: collection_id.into(),
        }
    }
}

/// Map of object key to its last successful sync.
///
/// Invariant: an entry with fingerprint F means the object, when it had
/// fingerprint F, was reflected in the target collection. Entries are only
/// written after a successful create or update.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SyncState {
    entries: BTreeMap<String, SyncEntry>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SyncEntry> {
        self.entries.get(key)
    }

    pub fn fingerprint_of(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.fingerprint.as_str())
    }

    pub fn record(&mut self, key: impl Into<String>, entry: SyncEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a persisted state blob.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Pretty-printed JSON (2-space indent) for human inspection.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
