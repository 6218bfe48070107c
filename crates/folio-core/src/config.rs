//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and then
//! overlaid with environment variables. Every section defaults sensibly so
//! a completely empty `{}` file (or no file at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load configuration strictly: a missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Overlay settings from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay settings from an arbitrary variable lookup.
    ///
    /// Unparseable numeric values are ignored with a warning so a typo in
    /// the environment never prevents start-up.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT value '{port}'"),
            }
        }

        if let Some(path) = get("DB_PATH") {
            self.database.path = PathBuf::from(path);
        } else if let Some(name) = get("DB_NAME") {
            self.database.path = PathBuf::from(format!("{name}.db"));
        }
        if let Some(size) = get("DB_POOL_SIZE") {
            match size.parse() {
                Ok(n) => self.database.pool_size = n,
                Err(_) => tracing::warn!("Ignoring invalid DB_POOL_SIZE value '{size}'"),
            }
        }

        if let Some(backend) = get("STORAGE_BACKEND") {
            match backend.as_str() {
                "s3" => self.storage.backend = StorageBackend::S3,
                "memory" => self.storage.backend = StorageBackend::Memory,
                other => tracing::warn!("Ignoring unknown STORAGE_BACKEND '{other}'"),
            }
        }
        if let Some(bucket) = get("STORAGE_BUCKET") {
            self.storage.bucket = bucket;
        }
        if let Some(region) = get("STORAGE_REGION") {
            self.storage.region = Some(region);
        }
        if let Some(endpoint) = get("STORAGE_ENDPOINT") {
            self.storage.endpoint = Some(endpoint);
        }
        if let Some(creds) = get("STORAGE_CREDENTIALS") {
            self.storage.credentials_file = Some(PathBuf::from(creds));
        }
        if let Some(ttl) = get("SIGNED_URL_TTL_SECS") {
            match ttl.parse() {
                Ok(t) => self.storage.signed_url_ttl_secs = t,
                Err(_) => tracing::warn!("Ignoring invalid SIGNED_URL_TTL_SECS value '{ttl}'"),
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.server.max_upload_bytes == 0 {
            warnings.push("server.max_upload_bytes is 0; every upload will be rejected".into());
        }

        if self.database.pool_size == 0 {
            warnings.push("database.pool_size is 0; a single connection will be used".into());
        }

        if self.storage.backend == StorageBackend::S3 {
            if self.storage.bucket.is_empty() {
                warnings.push("storage.bucket is empty".into());
            }
            if self.storage.signed_url_ttl_secs > MAX_SIGNED_URL_TTL_SECS {
                warnings.push(format!(
                    "storage.signed_url_ttl_secs {} exceeds the S3 maximum of {}; it will be capped",
                    self.storage.signed_url_ttl_secs, MAX_SIGNED_URL_TTL_SECS
                ));
            }
            if let Some(ref path) = self.storage.credentials_file {
                if !path.exists() {
                    warnings.push(format!(
                        "storage.credentials_file {} does not exist",
                        path.display()
                    ));
                }
            }
        }

        if self.storage.key_prefix.contains('/') {
            warnings.push("storage.key_prefix should not contain '/'".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Local directory served under `/images`.
    pub static_dir: Option<PathBuf>,
    /// Upper bound for multipart request bodies.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            static_dir: Some(PathBuf::from("images")),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Relational store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long a connection waits on a locked database before failing.
    /// The CLI and a running server may write the same file.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("folio.db"),
            pool_size: 4,
            busy_timeout_ms: 5_000,
        }
    }
}

/// Which object store implementation to connect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    S3,
    Memory,
}

/// Longest validity a SigV4 presigned URL may carry (one week).
pub const MAX_SIGNED_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Object store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: Option<String>,
    /// JSON credential blob; the default provider chain is used when unset.
    pub credentials_file: Option<PathBuf>,
    /// First segment of every generated object key.
    pub key_prefix: String,
    pub signed_url_ttl_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: "folio-images".into(),
            region: None,
            endpoint: None,
            credentials_file: None,
            key_prefix: "images".into(),
            signed_url_ttl_secs: MAX_SIGNED_URL_TTL_SECS,
        }
    }
}
