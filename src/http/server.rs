//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all resource routes under `/api`
//! - Wire up middleware (request ID, tracing, body limit, metrics)
//! - Inject the shared store into every resource handler
//! - Bind server to listener and drain on shutdown

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::handlers::ResourceHandler;
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::model::{Comment, Movie, Theater};
use crate::observability::metrics;
use crate::routing::{api_routes, dispatch, API_PREFIX};
use crate::store::Store;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub movies: ResourceHandler<Movie>,
    pub comments: ResourceHandler<Comment>,
    pub theaters: ResourceHandler<Theater>,
    /// Require the movie to exist before a comment is created under it.
    pub enforce_comment_parent: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &ApiConfig) -> Self {
        Self {
            movies: ResourceHandler::new(store.clone()),
            comments: ResourceHandler::new(store.clone()),
            theaters: ResourceHandler::new(store),
            enforce_comment_parent: config.store.enforce_comment_parent,
        }
    }
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: ApiConfig,
}

impl HttpServer {
    /// Create a new HTTP server backed by `store`.
    pub fn new(config: ApiConfig, store: Arc<dyn Store>) -> Self {
        let state = AppState::new(store, &config);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ApiConfig, state: AppState) -> Router {
        let api = api_routes().route_layer(middleware::from_fn(metrics::track_requests));

        Router::new()
            .nest(API_PREFIX, api)
            .fallback(dispatch::route_not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id(request),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight
    /// requests for at most the configured grace period.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let grace = Duration::from_secs(self.config.shutdown.grace_period_secs);
        let drain_signal = shutdown.resubscribe();

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .into_future();
        tokio::pin!(serve);

        tokio::select! {
            result = &mut serve => result?,
            _ = shutdown::wait(drain_signal) => {
                match tokio::time::timeout(grace, &mut serve).await {
                    Ok(result) => result?,
                    Err(_) => tracing::warn!(
                        grace_period_secs = grace.as_secs(),
                        "Grace period elapsed with requests still in flight"
                    ),
                }
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
