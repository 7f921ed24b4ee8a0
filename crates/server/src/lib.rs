//! REST server for the pricesync comparison pipeline
//!
//! Hosts the comparison and catalog-reload endpoints consumed by the
//! dashboard. The catalog snapshot is fetched once at startup and afterwards
//! only replaced through the reload endpoint, so comparison runs never block
//! on the store API.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod api;
mod rest_server;

// Re-export error types from core
pub use pricesync_core::error::{Error, Result};

use pricesync_catalog::CatalogProvider;
use pricesync_core::config::Config;
use pricesync_core::error::ResultExt;
use rest_server::AppState;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Run the REST server with the given configuration and catalog provider.
///
/// Primes the in-memory catalog snapshot with one full fetch, binds the
/// configured port, and serves until the process is stopped.
pub async fn run_server(config: Config, catalog: Arc<dyn CatalogProvider>) -> Result<()> {
    let snapshot = catalog
        .fetch_products()
        .await
        .context("failed to prime catalog snapshot")?;
    info!("Catalog snapshot primed: {} products", snapshot.len());

    let port = config.server.port;
    let server_config = config.server.clone();
    let state = AppState {
        catalog,
        config: Arc::new(config),
        snapshot: Arc::new(RwLock::new(snapshot)),
    };

    let router = rest_server::build_router(state, &server_config);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind server port")?;
    info!("REST server listening on port {port}");

    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
