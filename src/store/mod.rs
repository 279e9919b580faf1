//! Document store capability.
//!
//! # Data Flow
//! ```text
//! handler
//!     → resource::locator (validated ids → Filter / Query)
//!     → Store (find_one / find / insert_one / update_one / delete_one)
//!     → Document(s) or StoreError
//!     → http::response (envelope)
//! ```
//!
//! # Design Decisions
//! - The store is an injected `Arc<dyn Store>`, created once at startup
//! - Each operation is atomic on a single document; nothing spans documents
//! - Failures surface as `StoreError` and are never retried here
//! - Documents are untyped JSON objects; `_id` holds the hex identifier

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::resource::locator::Filter;
use crate::resource::ObjectId;

pub use memory::MemoryStore;

/// A stored document.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Field holding a document's own identifier.
pub const ID_FIELD: &str = "_id";

/// Named groupings of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Movies,
    Comments,
    Theaters,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Movies, Collection::Comments, Collection::Theaters];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Movies => "movies",
            Collection::Comments => "comments",
            Collection::Theaters => "theaters",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected or failed the operation.
    #[error("store operation failed: {0}")]
    Backend(String),

    /// A document does not have the expected shape.
    #[error("invalid document in {collection}: {reason}")]
    InvalidDocument { collection: Collection, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of `update_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Outcome of `delete_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Document store operations consumed by the resource handlers.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// First document matching `filter`.
    async fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>>;

    /// Up to `limit` documents matching `filter`, in identifier order.
    async fn find(&self, collection: Collection, filter: &Filter, limit: usize) -> StoreResult<Vec<Document>>;

    /// Insert `doc`, assigning an identifier when it carries none.
    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<ObjectId>;

    /// Replace every field except `_id` of the first document matching `filter`.
    async fn update_one(&self, collection: Collection, filter: &Filter, replacement: Document) -> StoreResult<UpdateResult>;

    /// Remove the first document matching `filter`.
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<DeleteResult>;
}
