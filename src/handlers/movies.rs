//! `/movies` and `/movies/{movie_id}`.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::http::request::{path_id, payload, segments, IdPath};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::model::{Movie, MOVIES};
use crate::resource::Scope;

pub async fn list(State(state): State<AppState>) -> ApiResult<Envelope> {
    state.movies.list(Scope::root()).await
}

pub async fn get(State(state): State<AppState>, path: IdPath) -> ApiResult<Envelope> {
    let id = path_id(MOVIES, &segments(path, |_| MOVIES)?)?;
    state.movies.get(Scope::root(), id).await
}

/// Creates a new movie. The path id is validated but the store assigns the
/// new document's identifier.
pub async fn create(
    State(state): State<AppState>,
    path: IdPath,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Envelope> {
    path_id(MOVIES, &segments(path, |_| MOVIES)?)?;
    let movie = payload::<Movie>(body)?;
    state.movies.create(Scope::root(), movie).await
}

pub async fn update(
    State(state): State<AppState>,
    path: IdPath,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Envelope> {
    let id = path_id(MOVIES, &segments(path, |_| MOVIES)?)?;
    let movie = payload::<Movie>(body)?;
    state.movies.update(Scope::root(), id, movie).await
}

pub async fn delete(State(state): State<AppState>, path: IdPath) -> ApiResult<Envelope> {
    let id = path_id(MOVIES, &segments(path, |_| MOVIES)?)?;
    state.movies.delete(Scope::root(), id).await
}
