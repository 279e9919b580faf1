//! Request handling.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) when the client sent none
//! - Validate path identifiers before any store access
//! - Turn a raw body into a typed write payload
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Bodies are read as bytes and parsed after path validation, so a malformed
//!   identifier is reported before a malformed payload
//! - An empty body selects the family's sample document

use axum::{
    body::Bytes,
    extract::{
        path::ErrorKind,
        rejection::{BytesRejection, PathRejection},
        Path,
    },
    http::{HeaderName, HeaderValue, Request, StatusCode},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::{ApiError, ApiResult};
use crate::model::{Resource, ResourceKind};
use crate::resource::{InvalidId, ObjectId};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request ID of `request`, or "unknown".
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Validate a raw path segment as an identifier of `kind`.
pub fn path_id(kind: ResourceKind, raw: &str) -> ApiResult<ObjectId> {
    ObjectId::parse(raw).map_err(|e| ApiError::invalid_id(kind, e))
}

/// Path extraction that leaves rejections to [`segments`].
pub type IdPath<T = String> = Result<Path<T>, PathRejection>;

/// Unwrap extracted path segments.
///
/// A segment axum cannot decode (e.g. invalid UTF-8 once percent-decoded) is
/// reported as a malformed identifier of the family `owner` picks for the
/// offending parameter name.
pub fn segments<T>(
    path: IdPath<T>,
    owner: impl FnOnce(Option<&str>) -> ResourceKind,
) -> ApiResult<T> {
    match path {
        Ok(Path(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Undecodable path segment");
            Err(ApiError::invalid_id(owner(rejected_param(&rejection)), InvalidId))
        }
    }
}

/// Name of the path parameter a rejection points at, if any.
fn rejected_param(rejection: &PathRejection) -> Option<&str> {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::InvalidUtf8InPathParam { key }
            | ErrorKind::ParseErrorAtKey { key, .. }
            | ErrorKind::DeserializeError { key, .. } => Some(key.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Parse a write payload. `Ok(None)` means the body was empty.
pub fn payload<R: Resource>(body: Result<Bytes, BytesRejection>) -> ApiResult<Option<R>> {
    let bytes = body.map_err(|rejection| ApiError::InvalidPayload {
        kind: R::KIND,
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| ApiError::InvalidPayload {
            kind: R::KIND,
            status: StatusCode::BAD_REQUEST,
            detail: e.to_string(),
        })
}
