//! folio-storage: object store access for uploaded images.
//!
//! Backends implement [`ObjectStore`]: blobs go in under a key and come back
//! out as signed, read-only URLs. [`connect`] picks the backend named in
//! [`StorageConfig`].

pub mod memory;
pub mod s3;
pub mod upload;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use folio_core::config::{StorageBackend, StorageConfig, MAX_SIGNED_URL_TTL_SECS};
use folio_core::Result;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;
pub use upload::{object_key, store_and_sign, StoredObject, UploadedFile};

/// A single-bucket blob store that can hand out signed read URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket every key lives in.
    fn bucket(&self) -> &str;

    /// Write `body` under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()>;

    /// Produce a read-only URL for `key` valid for `expires_in`.
    async fn signed_read_url(&self, key: &str, expires_in: Duration) -> Result<String>;
}

/// Clamp a requested URL lifetime to what SigV4 accepts. Every backend
/// applies it so the reported expiry does not depend on the backend.
pub fn clamp_ttl(expires_in: Duration) -> Duration {
    expires_in.min(Duration::from_secs(MAX_SIGNED_URL_TTL_SECS))
}

/// Construct the object store selected by `config`.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    match config.backend {
        StorageBackend::S3 => {
            let store = S3ObjectStore::connect(config).await?;
            tracing::info!("Object store: s3 bucket '{}'", store.bucket());
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            tracing::warn!("Object store: in-memory bucket '{}'; uploads are not persisted", config.bucket);
            Ok(Arc::new(MemoryObjectStore::new(config.bucket.clone())))
        }
    }
}
