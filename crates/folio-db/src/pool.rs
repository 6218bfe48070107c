//! SQLite connection pools.
//!
//! Every connection gets a busy timeout so that short write bursts from the
//! CLI and the server queue up instead of failing with `SQLITE_BUSY`.

use std::time::Duration;

use folio_core::config::DatabaseConfig;
use folio_core::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::migrations;

pub type DbPool = Pool<SqliteConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Open (or create) the database file named in `config`, switch it to WAL
/// and bring the schema up to date.
pub fn init_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let busy = Duration::from_millis(config.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
        conn.busy_timeout(busy)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")
    });

    let pool = build(manager, config.pool_size)?;
    tracing::debug!(
        path = %config.path.display(),
        pool_size = pool.max_size(),
        "Opened database pool"
    );
    Ok(pool)
}

/// Pool over a fresh shared-cache in-memory database.
///
/// Each call gets its own database, so parallel tests stay isolated while
/// connections within one pool see the same data.
pub fn init_memory_pool() -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:folio_memdb_{n}?mode=memory&cache=shared");

    let defaults = DatabaseConfig::default();
    let busy = Duration::from_millis(defaults.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(uri).with_init(move |conn| conn.busy_timeout(busy));

    build(manager, defaults.pool_size)
}

fn build(manager: SqliteConnectionManager, pool_size: u32) -> Result<DbPool> {
    let pool = Pool::builder()
        .max_size(pool_size.max(1))
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {e}")))?;

    migrations::run_migrations(&*get_conn(&pool)?)?;
    Ok(pool)
}

pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {e}")))
}
