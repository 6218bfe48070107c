//! S3 (and S3-compatible) object store backed by `aws-sdk-s3`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use folio_core::config::StorageConfig;
use folio_core::{Error, Result};
use serde::Deserialize;

use crate::{clamp_ttl, ObjectStore};

/// Service-account style credential blob read from `storage.credentials_file`.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialBlob {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl CredentialBlob {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Validation(format!("credential file parse error: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn into_credentials(self) -> Credentials {
        Credentials::new(
            self.access_key_id,
            self.secret_access_key,
            self.session_token,
            None,
            "folio-credential-file",
        )
    }
}

/// [`ObjectStore`] over a single S3 bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Wrap an already configured client.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from `config`.
    ///
    /// Credentials come from the credential blob when one is configured and
    /// from the default AWS provider chain otherwise. A custom endpoint
    /// switches to path-style addressing for S3-compatible services.
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        let mut region = config.region.clone();

        if let Some(ref path) = config.credentials_file {
            let blob = CredentialBlob::load(path)?;
            if region.is_none() {
                region = blob.region.clone();
            }
            loader = loader.credentials_provider(blob.into_credentials());
            tracing::debug!("Using object store credentials from {}", path.display());
        }

        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(ref endpoint) = config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.endpoint.is_some())
            .build();

        Ok(Self::new(Client::from_conf(s3_config), config.bucket.clone()))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| Error::storage("put_object", DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn signed_read_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(clamp_ttl(expires_in))
            .map_err(|e| Error::storage("presign", e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| Error::storage("presign", DisplayErrorContext(e).to_string()))?;

        Ok(request.uri().to_string())
    }
}
