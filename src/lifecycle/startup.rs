//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the store handle (seeded or empty)
//! - Bind the listener
//! - Start the metrics exporter when enabled
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - The listener binds last (traffic only when ready)

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ApiConfig;
use crate::observability::metrics;
use crate::store::{MemoryStore, Store, StoreResult};

/// Create the store handle shared by every request.
pub fn build_store(config: &ApiConfig) -> StoreResult<Arc<dyn Store>> {
    let store = match &config.store.seed_path {
        Some(path) => MemoryStore::load_from_file(path)?,
        None => {
            tracing::info!("Starting with an empty store");
            MemoryStore::new()
        }
    };
    Ok(Arc::new(store))
}

/// Start the metrics exporter if configured. Addresses are validated beforehand.
pub fn start_metrics(config: &ApiConfig) {
    if !config.observability.metrics_enabled {
        return;
    }
    match config.observability.metrics_address.parse() {
        Ok(addr) => metrics::init_metrics(addr),
        Err(_) => tracing::error!(
            metrics_address = %config.observability.metrics_address,
            "Failed to parse metrics address"
        ),
    }
}

/// Bind the API listener.
pub async fn bind(config: &ApiConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok(listener)
}
