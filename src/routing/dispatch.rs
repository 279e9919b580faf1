//! Method dispatch for resource routes.
//!
//! # Responsibilities
//! - Attach each route's implemented verbs to their handlers
//! - Answer every other verb with the 405 envelope
//! - Answer unknown paths with a 404 envelope
//!
//! # Design Decisions
//! - Stateless: the decision depends only on the route and the verb
//! - Unsupported verbs never reach a handler or the store, HEAD included

use axum::{
    handler::Handler,
    http::{Method, Uri},
    routing::MethodRouter,
};

use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Verbs a resource route may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// Builds the method router for one path.
///
/// Starts with nothing implemented; every verb added via [`Dispatch::on`]
/// maps to its handler, everything else falls through to the 405 envelope.
pub struct Dispatch {
    router: MethodRouter<AppState>,
}

impl Dispatch {
    pub fn new() -> Self {
        Self {
            router: MethodRouter::new().fallback(method_not_allowed),
        }
    }

    /// Route `verb` to `handler`.
    pub fn on<H, T>(self, verb: Verb, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let router = match verb {
            // `get` alone would also answer HEAD; HEAD is not an implemented verb.
            Verb::Get => self.router.get(handler).head(method_not_allowed),
            Verb::Post => self.router.post(handler),
            Verb::Put => self.router.put(handler),
            Verb::Delete => self.router.delete(handler),
        };
        Self { router }
    }

    pub fn into_router(self) -> MethodRouter<AppState> {
        self.router
    }
}

impl Default for Dispatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback for verbs a route does not implement.
pub async fn method_not_allowed(method: Method) -> ApiError {
    tracing::debug!(method = %method, "Unsupported method");
    ApiError::MethodNotAllowed(method)
}

/// Fallback for paths outside the route table.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
