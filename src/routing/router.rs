//! Route table for the `/api` surface.
//!
//! # Responsibilities
//! - Declare every resource path and the verbs it implements
//! - Leave all other verbs to the dispatcher's 405 fallback
//!
//! # Routes
//! - `/movies`: GET
//! - `/movies/{movie_id}`: GET, POST, PUT, DELETE
//! - `/movies/{movie_id}/comments`: GET
//! - `/movies/{movie_id}/comments/{comment_id}`: GET, POST, PUT, DELETE
//! - `/theaters`: GET
//! - `/theaters/{theater_id}`: GET, POST, PUT, DELETE
//!
//! # Design Decisions
//! - Built once at startup, immutable at runtime
//! - Path segments are extracted raw; handlers validate them

use axum::Router;

use crate::handlers::{comments, movies, theaters};
use crate::http::server::AppState;
use crate::routing::dispatch::{Dispatch, Verb};

/// Prefix all resource routes are nested under.
pub const API_PREFIX: &str = "/api";

/// Build the resource routes (without the `/api` prefix).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            Dispatch::new().on(Verb::Get, movies::list).into_router(),
        )
        .route(
            "/movies/{movie_id}",
            Dispatch::new()
                .on(Verb::Get, movies::get)
                .on(Verb::Post, movies::create)
                .on(Verb::Put, movies::update)
                .on(Verb::Delete, movies::delete)
                .into_router(),
        )
        .route(
            "/movies/{movie_id}/comments",
            Dispatch::new().on(Verb::Get, comments::list).into_router(),
        )
        .route(
            "/movies/{movie_id}/comments/{comment_id}",
            Dispatch::new()
                .on(Verb::Get, comments::get)
                .on(Verb::Post, comments::create)
                .on(Verb::Put, comments::update)
                .on(Verb::Delete, comments::delete)
                .into_router(),
        )
        .route(
            "/theaters",
            Dispatch::new().on(Verb::Get, theaters::list).into_router(),
        )
        .route(
            "/theaters/{theater_id}",
            Dispatch::new()
                .on(Verb::Get, theaters::get)
                .on(Verb::Post, theaters::create)
                .on(Verb::Put, theaters::update)
                .on(Verb::Delete, theaters::delete)
                .into_router(),
        )
}
