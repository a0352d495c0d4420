//! Object store capability: list, get, put.
//!
//! - [`S3Store`] - S3-compatible HTTP backend (MinIO, AWS) with SigV4 signing
//! - [`InMemoryObjectStore`] - deterministic backend for tests and local runs

mod listing;
mod memory;
mod s3;
mod sigv4;

pub use memory::InMemoryObjectStore;
pub use s3::S3Store;

use async_trait::async_trait;
use bytes::Bytes;
use docsync_types::{ObjectRecord, StoreError};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Every object in `bucket`, in store listing order.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectRecord>, StoreError>;

    /// Full object body; a missing key is [`StoreError::NotFound`].
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;
}
