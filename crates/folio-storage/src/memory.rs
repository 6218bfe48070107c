//! Process-local object store, for tests and local development.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use folio_core::{Error, Result};
use parking_lot::RwLock;

use crate::{clamp_ttl, ObjectStore};

/// A blob held by [`MemoryObjectStore`].
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Bytes,
    pub content_type: String,
}

/// In-memory [`ObjectStore`]. Signed URLs use a `memory://` scheme and are
/// not resolvable outside the process.
#[derive(Debug)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: RwLock<BTreeMap<String, StoredBlob>>,
    fail_puts: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: RwLock::new(BTreeMap::new()),
            fail_puts: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `put_object` fail (or succeed again).
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::Relaxed);
    }

    pub fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.read().get(key).cloned()
    }

    /// All stored keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        if self.fail_puts.load(Ordering::Relaxed) {
            return Err(Error::storage("put_object", "memory store is failing writes"));
        }
        self.objects.write().insert(
            key.to_string(),
            StoredBlob {
                data: body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn signed_read_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        let ttl = chrono::Duration::from_std(clamp_ttl(expires_in))
            .map_err(|e| Error::storage("presign", e.to_string()))?;
        let expires = (chrono::Utc::now() + ttl).timestamp();
        Ok(format!("memory://{}/{key}?expires={expires}", self.bucket))
    }
}
