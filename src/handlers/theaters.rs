//! `/theaters` and `/theaters/{theater_id}`.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::http::request::{path_id, payload, segments, IdPath};
use crate::http::response::{ApiResult, Envelope};
use crate::http::server::AppState;
use crate::model::{Theater, THEATERS};
use crate::resource::Scope;

pub async fn list(State(state): State<AppState>) -> ApiResult<Envelope> {
    state.theaters.list(Scope::root()).await
}

pub async fn get(State(state): State<AppState>, path: IdPath) -> ApiResult<Envelope> {
    let id = path_id(THEATERS, &segments(path, |_| THEATERS)?)?;
    state.theaters.get(Scope::root(), id).await
}

pub async fn create(
    State(state): State<AppState>,
    path: IdPath,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Envelope> {
    path_id(THEATERS, &segments(path, |_| THEATERS)?)?;
    let theater = payload::<Theater>(body)?;
    state.theaters.create(Scope::root(), theater).await
}

pub async fn update(
    State(state): State<AppState>,
    path: IdPath,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Envelope> {
    let id = path_id(THEATERS, &segments(path, |_| THEATERS)?)?;
    let theater = payload::<Theater>(body)?;
    state.theaters.update(Scope::root(), id, theater).await
}

pub async fn delete(State(state): State<AppState>, path: IdPath) -> ApiResult<Envelope> {
    let id = path_id(THEATERS, &segments(path, |_| THEATERS)?)?;
    state.theaters.delete(Scope::root(), id).await
}
