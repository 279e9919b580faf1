//! Typed documents for each resource family.
//!
//! # Responsibilities
//! - Describe each family (collection, names used in envelopes)
//! - Deserialize client-supplied write payloads into typed documents
//! - Provide the fixed sample documents written when a request has no body
//!
//! # Design Decisions
//! - Unknown payload fields are dropped; the typed shape is what gets stored
//! - Store-managed fields (`_id`, parent references) never come from payloads

pub mod comment;
pub mod movie;
pub mod theater;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{Collection, Document, StoreError};

pub use comment::Comment;
pub use movie::Movie;
pub use theater::{Address, Geo, Location, Theater};

/// Static description of a resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub collection: Collection,
    /// Key wrapping a single document, lowercase (e.g. "movie").
    pub singular: &'static str,
    /// Key wrapping a listing (e.g. "movies").
    pub plural: &'static str,
    /// Capitalized name used in messages (e.g. "Movie").
    pub label: &'static str,
}

pub const MOVIES: ResourceKind = ResourceKind {
    collection: Collection::Movies,
    singular: "movie",
    plural: "movies",
    label: "Movie",
};

pub const COMMENTS: ResourceKind = ResourceKind {
    collection: Collection::Comments,
    singular: "comment",
    plural: "comments",
    label: "Comment",
};

pub const THEATERS: ResourceKind = ResourceKind {
    collection: Collection::Theaters,
    singular: "theater",
    plural: "theaters",
    label: "Theater",
};

/// A document type managed through the API.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Content written by a create request without a body.
    fn sample() -> Self;

    /// Content written by an update request without a body.
    fn sample_revision() -> Self;

    /// Convert into a storable document.
    fn into_document(self) -> Result<Document, StoreError> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(StoreError::InvalidDocument {
                collection: Self::KIND.collection,
                reason: format!("expected an object, got {}", other),
            }),
        }
    }
}
