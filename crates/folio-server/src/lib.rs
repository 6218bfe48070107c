//! folio-server: HTTP API for the portfolio site.
//!
//! This crate ties the database and the object store together behind an
//! Axum router. It provides:
//!
//! - Admin login against the `users` table
//! - Per-page image slot listings and single-image lookups
//! - Multipart uploads to the object store with signed read URLs
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod gallery;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod upload;

use std::net::SocketAddr;

use folio_core::config::Config;

use crate::context::AppContext;

/// Start the folio server.
///
/// Opens the database, connects the object store, and serves HTTP until a
/// shutdown signal arrives.
pub async fn start(config: Config) -> folio_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let db_path = &config.database.path;
    let existed = db_path.exists();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }
    let db = folio_db::pool::init_pool(&config.database)?;
    if existed {
        tracing::info!("Database opened (existing) at {}", db_path.display());
    } else {
        tracing::info!("Database created (new) at {}", db_path.display());
    }

    let storage = folio_storage::connect(&config.storage).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| folio_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let ctx = AppContext::new(db, config, storage);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| folio_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Server is running on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
