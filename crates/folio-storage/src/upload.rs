//! Store-then-sign sequence shared by the upload endpoints.

use std::time::Duration;

use bytes::Bytes;
use folio_core::Result;

use crate::ObjectStore;

/// A file received from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    /// Client-supplied file name.
    pub original_name: String,
    pub content_type: String,
}

/// Where an upload landed and how to read it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

/// Build the object key `<prefix>/<unix-ms>_<original-name>`.
///
/// Only the final path component of `original_name` is kept so clients
/// cannot place objects outside `prefix`.
pub fn object_key(prefix: &str, timestamp_ms: i64, original_name: &str) -> String {
    let name = original_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|n| !n.is_empty())
        .unwrap_or("upload");
    format!("{prefix}/{timestamp_ms}_{name}")
}

/// Put `file` into `store` under a time-derived key and sign a read URL.
pub async fn store_and_sign(
    store: &dyn ObjectStore,
    prefix: &str,
    ttl: Duration,
    file: UploadedFile,
) -> Result<StoredObject> {
    let key = object_key(prefix, chrono::Utc::now().timestamp_millis(), &file.original_name);
    let size = file.bytes.len();

    store.put_object(&key, file.bytes, &file.content_type).await?;
    tracing::debug!(key = %key, size, "Stored object");

    let url = store.signed_read_url(&key, ttl).await?;
    Ok(StoredObject { key, url })
}
