//! Application context shared by every route handler.
//!
//! [`AppContext`] is constructed once at start-up and handed to Axum as
//! router state. It only holds `Arc`s and a pool handle, so cloning it per
//! request is cheap.

use std::sync::Arc;
use std::time::Duration;

use folio_core::config::Config;
use folio_db::pool::DbPool;
use folio_storage::ObjectStore;

/// Application context shared by all request handlers (via Axum state).
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Object store receiving uploaded images.
    pub storage: Arc<dyn ObjectStore>,
}

impl AppContext {
    pub fn new(db: DbPool, config: Config, storage: Arc<dyn ObjectStore>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            storage,
        }
    }

    /// Lifetime of signed read URLs handed back to clients.
    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.config.storage.signed_url_ttl_secs)
    }

    /// First segment of generated object keys.
    pub fn key_prefix(&self) -> &str {
        &self.config.storage.key_prefix
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("db_connections", &self.db.state().connections)
            .field("bucket", &self.storage.bucket())
            .finish_non_exhaustive()
    }
}
