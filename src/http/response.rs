//! Response envelope and outcome mapping.
//!
//! # Responsibilities
//! - Build the uniform `{status, message?, data?, error?}` body
//! - Map every outcome (success, invalid id, not found, unsupported method,
//!   store failure) to exactly one status code
//! - Keep the body's `status` equal to the HTTP status
//!
//! # Design Decisions
//! - Handlers return `Result<Envelope, ApiError>`; both sides render an envelope
//! - `data` and `error` are never populated together
//! - Store failures expose the error message, never a backtrace

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::ResourceKind;
use crate::resource::InvalidId;
use crate::store::StoreError;

/// Uniform response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// 200 with data and no message (reads, deletes).
    pub fn ok(data: Value) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: None,
            data: Some(data),
            error: None,
        }
    }

    /// 201 after a create.
    pub fn created(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: StatusCode::CREATED.as_u16(),
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// 200 after an update.
    pub fn updated(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Failure body.
    pub fn failure(status: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: Some(message.into()),
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Every failure outcome a request can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A path identifier is malformed. Never reaches the store.
    #[error("Invalid {} ID: {source}", .kind.singular)]
    InvalidId {
        kind: ResourceKind,
        #[source]
        source: InvalidId,
    },

    /// Well-formed identifier with no matching document in scope.
    #[error("{} not found", .kind.label)]
    NotFound { kind: ResourceKind },

    /// The route exists but does not define this verb.
    #[error("{0} method is not supported")]
    MethodNotAllowed(Method),

    /// The request body could not be read or does not fit the document type.
    #[error("Invalid {} payload: {detail}", .kind.singular)]
    InvalidPayload {
        kind: ResourceKind,
        status: StatusCode,
        detail: String,
    },

    /// No route matches the request path.
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// The store failed.
    #[error("Internal Server Error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn invalid_id(kind: ResourceKind, source: InvalidId) -> Self {
        Self::InvalidId { kind, source }
    }

    pub fn not_found(kind: ResourceKind) -> Self {
        Self::NotFound { kind }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidPayload { status, .. } => *status,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the failure envelope.
    pub fn to_envelope(&self) -> Envelope {
        let status = self.status();
        match self {
            ApiError::InvalidId { kind, source } => Envelope::failure(
                status,
                format!("Invalid {} ID", kind.singular),
                source.to_string(),
            ),
            ApiError::NotFound { kind } => Envelope::failure(
                status,
                format!("{} not found", kind.label),
                format!("No {} found with the given ID", kind.singular),
            ),
            ApiError::MethodNotAllowed(method) => Envelope::failure(
                status,
                "Method Not Allowed",
                format!("{} method is not supported", method),
            ),
            ApiError::InvalidPayload { kind, detail, .. } => Envelope::failure(
                status,
                format!("Invalid {} payload", kind.singular),
                detail.clone(),
            ),
            ApiError::RouteNotFound(path) => {
                Envelope::failure(status, "Route not found", format!("No route matches {}", path))
            }
            ApiError::Store(e) => Envelope::failure(status, "Internal Server Error", e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => tracing::error!(error = %e, "Store operation failed"),
            other => tracing::debug!(status = %other.status(), reason = %other, "Request rejected"),
        }
        self.to_envelope().into_response()
    }
}
