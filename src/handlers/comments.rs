//! `/movies/{movie_id}/comments` and `/movies/{movie_id}/comments/{comment_id}`.
//!
//! Comments are addressed under their movie: every filter conjoins
//! `movie_id`, so a comment requested under the wrong movie is not found.
//! Whether the movie itself must exist when a comment is created is decided
//! by `store.enforce_comment_parent`.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
};

use crate::http::request::{path_id, payload, segments, IdPath};
use crate::http::response::{ApiError, ApiResult, Envelope};
use crate::http::server::AppState;
use crate::model::comment::PARENT_FIELD;
use crate::model::{Comment, ResourceKind, COMMENTS, MOVIES};
use crate::resource::{ObjectId, Scope};

type CommentPath = IdPath<(String, String)>;

/// Family owning a path parameter; only `comment_id` belongs to comments.
fn owner(param: Option<&str>) -> ResourceKind {
    match param {
        Some("comment_id") => COMMENTS,
        _ => MOVIES,
    }
}

/// Validate both path ids, movie first, before anything else happens.
fn ids(path: CommentPath) -> ApiResult<(Scope, ObjectId)> {
    let (movie_id, comment_id) = segments(path, owner)?;
    let movie = path_id(MOVIES, &movie_id)?;
    let comment = path_id(COMMENTS, &comment_id)?;
    Ok((Scope::nested(PARENT_FIELD, movie), comment))
}

pub async fn list(
    State(state): State<AppState>,
    path: IdPath,
) -> ApiResult<Envelope> {
    let movie = path_id(MOVIES, &segments(path, owner)?)?;
    state.comments.list(Scope::nested(PARENT_FIELD, movie)).await
}

pub async fn get(
    State(state): State<AppState>,
    path: CommentPath,
) -> ApiResult<Envelope> {
    let (scope, id) = ids(path)?;
    state.comments.get(scope, id).await
}

pub async fn create(
    State(state): State<AppState>,
    path: CommentPath,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Envelope> {
    let (scope, _) = ids(path)?;
    let comment = payload::<Comment>(body)?;

    if state.enforce_comment_parent {
        if let Some(parent) = scope.parent() {
            if !state.movies.exists(parent.id).await? {
                return Err(ApiError::not_found(MOVIES));
            }
        }
    }

    state.comments.create(scope, comment).await
}

pub async fn update(
    State(state): State<AppState>,
    path: CommentPath,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Envelope> {
    let (scope, id) = ids(path)?;
    let comment = payload::<Comment>(body)?;
    state.comments.update(scope, id, comment).await
}

pub async fn delete(
    State(state): State<AppState>,
    path: CommentPath,
) -> ApiResult<Envelope> {
    let (scope, id) = ids(path)?;
    state.comments.delete(scope, id).await
}
