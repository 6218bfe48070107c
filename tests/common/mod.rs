//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, an in-memory
//! object store, default config, and a full [`AppContext`]. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use folio_core::config::Config;
use folio_db::models::{ImageRecord, User};
use folio_db::pool::{init_memory_pool, DbPool};
use folio_server::context::AppContext;
use folio_server::router::build_router;
use folio_storage::MemoryObjectStore;

/// Test harness wrapping a fully-constructed [`AppContext`] backed by an
/// in-memory database and object store.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    pub storage: Arc<MemoryObjectStore>,
}

impl TestHarness {
    /// Create a new harness with default configuration (no static dir).
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.static_dir = None;
        Self::with_config(config)
    }

    /// Create a new harness with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let storage = Arc::new(MemoryObjectStore::new("test-bucket"));
        let ctx = AppContext::new(db.clone(), config, storage.clone());
        Self { ctx, db, storage }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let addr = harness.serve().await;
        (harness, addr)
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let addr = harness.serve().await;
        (harness, addr)
    }

    async fn serve(&self) -> SocketAddr {
        let app = build_router(self.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> folio_db::pool::PooledConnection {
        folio_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    /// Insert an admin user.
    pub fn create_user(&self, username: &str, password: &str) -> User {
        folio_db::queries::users::create_user(&self.conn(), username, password, "admin")
            .expect("failed to create user")
    }

    /// Insert an image row.
    pub fn create_image(&self, url: &str, slot_type: Option<&str>, pages: &[&str]) -> ImageRecord {
        folio_db::queries::images::create_image(&self.conn(), url, slot_type, pages)
            .expect("failed to create image")
    }

    /// Re-read an image row.
    pub fn image(&self, id: i64) -> Option<ImageRecord> {
        folio_db::queries::images::get_image(&self.conn(), id).expect("failed to read image")
    }
}
