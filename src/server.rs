//! HTTP server initialization and runtime setup.
//!
//! Opens the configured store, wires services and runs the Axum server until
//! a shutdown signal arrives.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::persistence::{FileUrlRepository, MemoryUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the repository selected by `config`.
///
/// # Errors
///
/// Returns an error if the file backend cannot read or create its snapshot.
pub async fn open_repository(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Storage backend: memory (records are not persisted)");
            Ok(Arc::new(MemoryUrlRepository::new()))
        }
        StorageBackend::File => {
            let repository = FileUrlRepository::open(&config.storage_file)
                .await
                .with_context(|| {
                    format!(
                        "Failed to open snapshot file {}",
                        config.storage_file.display()
                    )
                })?;
            tracing::info!(
                "Storage backend: file ({})",
                repository.path().display()
            );
            Ok(Arc::new(repository))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Every store mutation is committed before its request completes, so no
/// extra flushing is needed on shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = open_repository(&config).await?;
    let state = AppState::new(repository, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
