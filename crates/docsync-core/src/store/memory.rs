use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use docsync_types::{ObjectRecord, StoreError};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::sigv4::sha256_hex;
use super::ObjectStore;

#[derive(Debug, Clone)]
struct StoredObject {
    body: Bytes,
    etag: String,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// In-memory bucket store. Keys list in lexicographic order like S3.
///
/// ETags are the hex SHA-256 of the body, so rewriting identical content
/// keeps the fingerprint stable.
pub struct InMemoryObjectStore {
    buckets: RwLock<BTreeMap<String, BTreeMap<String, StoredObject>>>,
    failing_gets: RwLock<HashSet<String>>,
    failing_puts: AtomicBool,
    failing_list: AtomicBool,
    puts: AtomicUsize,
}

impl InMemoryObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(BTreeMap::new()),
            failing_gets: RwLock::new(HashSet::new()),
            failing_puts: AtomicBool::new(false),
            failing_list: AtomicBool::new(false),
            puts: AtomicUsize::new(0),
        }
    }

    /// Store `body` under `key`, returning the new ETag.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Bytes>) -> String {
        let body = body.into();
        let etag = sha256_hex(&body);
        self.insert_with_etag(bucket, key, body, &etag);
        etag
    }

    /// Store `body` under `key` with a caller-chosen ETag.
    pub fn insert_with_etag(&self, bucket: &str, key: &str, body: impl Into<Bytes>, etag: &str) {
        self.buckets.write().entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            StoredObject {
                body: body.into(),
                etag: etag.to_string(),
                content_type: "application/octet-stream".to_string(),
                last_modified: Utc::now(),
            },
        );
    }

    pub fn body(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.buckets.read().get(bucket).and_then(|b| b.get(key)).map(|o| o.body.clone())
    }

    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.buckets.read().get(bucket).and_then(|b| b.get(key)).map(|o| o.content_type.clone())
    }

    /// Make downloads of `key` fail with [`StoreError::Unavailable`].
    pub fn fail_get(&self, key: &str) {
        self.failing_gets.write().insert(key.to_string());
    }

    pub fn set_fail_puts(&self, fail: bool) {
        self.failing_puts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.failing_list.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `put_object` calls.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectRecord>, StoreError> {
        if self.failing_list.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable { message: "listing disabled".to_string() });
        }
        Ok(self
            .buckets
            .read()
            .get(bucket)
            .map(|objects| {
                objects
                    .iter()
                    .map(|(key, obj)| ObjectRecord {
                        key: key.clone(),
                        fingerprint: obj.etag.clone(),
                        size: obj.body.len() as u64,
                        last_modified: obj.last_modified,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        if self.failing_gets.read().contains(key) {
            return Err(StoreError::Unavailable { message: format!("injected failure for {key}") });
        }
        self.body(bucket, key).ok_or_else(|| StoreError::NotFound { key: key.to_string() })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        if self.failing_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Status { status: 503, message: "writes disabled".to_string() });
        }
        self.insert(bucket, key, body);
        if let Some(obj) = self.buckets.write().get_mut(bucket).and_then(|b| b.get_mut(key)) {
            obj.content_type = content_type.to_string();
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_lists_nothing() {
        let store = InMemoryObjectStore::new();
        assert!(store.list_objects("docs").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_is_sorted_with_content_etags() {
        let store = InMemoryObjectStore::new();
        let etag_b = store.insert("docs", "b.md", "bee");
        store.insert("docs", "a.md", "ay");

        let listed = store.list_objects("docs").await.unwrap();
        assert_eq!(listed[0].key, "a.md");
        assert_eq!(listed[1].key, "b.md");
        assert_eq!(listed[1].fingerprint, etag_b);
        assert_eq!(listed[1].size, 3);
    }

    #[tokio::test]
    async fn test_etag_tracks_content() {
        let store = InMemoryObjectStore::new();
        let first = store.insert("docs", "a.md", "v1");
        let same = store.insert("docs", "a.md", "v1");
        let changed = store.insert("docs", "a.md", "v2");

        assert_eq!(first, same);
        assert_ne!(first, changed);
    }

    #[tokio::test]
    async fn test_missing_and_failing_gets() {
        let store = InMemoryObjectStore::new();
        store.insert("docs", "a.md", "x");
        store.fail_get("a.md");

        assert!(store.get_object("docs", "nope.md").await.unwrap_err().is_not_found());
        assert!(matches!(
            store.get_object("docs", "a.md").await.unwrap_err(),
            StoreError::Unavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_put_records_content_type() {
        let store = InMemoryObjectStore::new();
        store.put_object("docs", "s.json", b"{}".to_vec(), "application/json").await.unwrap();

        assert_eq!(store.put_count(), 1);
        assert_eq!(store.content_type("docs", "s.json").as_deref(), Some("application/json"));
    }
}
