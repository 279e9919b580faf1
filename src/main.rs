//! mflix-api
//!
//! REST API for movies, their comments, and theaters, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, body limit)
//!                         │
//!                         ▼
//!                     routing (path → dispatch → verb)
//!                         │                      │
//!                         │                      └─▶ 405 / 404 envelope
//!                         ▼
//!                     handlers (validate ids → payload → ResourceHandler)
//!                         │
//!                         ▼
//!                     resource::Scope → Filter / Query
//!                         │
//!                         ▼
//!                     store (Arc<dyn Store>)
//!                         │
//!     Client Response     ▼
//!     ◀────────────── http::response (Envelope / ApiError)
//!
//!     Cross-cutting: config, observability (logs, metrics), lifecycle
//! ```

use clap::Parser;
use std::path::PathBuf;

use mflix_api::config::{load_config, validate_config, ApiConfig, ConfigError};
use mflix_api::http::HttpServer;
use mflix_api::lifecycle::{signals, startup, Shutdown};
use mflix_api::observability::logging;

#[derive(Parser)]
#[command(name = "mflix-api")]
#[command(about = "REST API for the sample movie database", long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ApiConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability)?;

    tracing::info!("mflix-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        seed_path = ?config.store.seed_path,
        enforce_comment_parent = config.store.enforce_comment_parent,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    let store = startup::build_store(&config)?;
    startup::start_metrics(&config);
    let listener = startup::bind(&config).await?;

    let shutdown = Shutdown::new();
    let signal_task = signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    signal_task.abort();
    tracing::info!("Shutdown complete");
    Ok(())
}
