//! Resource handlers.
//!
//! # Data Flow
//! ```text
//! axum handler (movies.rs / comments.rs / theaters.rs)
//!     → request::path_id (validate every path id first)
//!     → request::payload (writes only)
//!     → ResourceHandler<R> (Scope → Filter → Store)
//!     → Envelope | ApiError
//! ```
//!
//! # Design Decisions
//! - One generic skeleton for every family; families differ only by `Resource`
//!   and, for comments, a parent `Scope`
//! - The store is injected; nothing here holds process-global state
//! - Updates always answer 200

pub mod comments;
pub mod movies;
pub mod theaters;

use serde_json::{json, Value};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::http::response::{ApiError, ApiResult, Envelope};
use crate::model::Resource;
use crate::resource::{ObjectId, Scope};
use crate::store::{Document, Store, ID_FIELD};

/// Store-backed operations for one resource family.
pub struct ResourceHandler<R> {
    store: Arc<dyn Store>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceHandler<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceHandler<R> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    /// List up to `LIST_LIMIT` documents in scope.
    pub async fn list(&self, scope: Scope) -> ApiResult<Envelope> {
        let query = scope.many();
        let docs = self
            .store
            .find(R::KIND.collection, &query.filter, query.limit)
            .await?;
        Ok(Envelope::ok(keyed(
            R::KIND.plural,
            Value::Array(docs.into_iter().map(Value::Object).collect()),
        )))
    }

    /// Fetch one document.
    pub async fn get(&self, scope: Scope, id: ObjectId) -> ApiResult<Envelope> {
        let doc = self.find(scope, id).await?;
        Ok(Envelope::ok(keyed(R::KIND.singular, Value::Object(doc))))
    }

    /// Insert a new document; the store assigns its identifier.
    pub async fn create(&self, scope: Scope, payload: Option<R>) -> ApiResult<Envelope> {
        let mut doc = payload.unwrap_or_else(R::sample).into_document()?;
        doc.remove(ID_FIELD);
        scope.stamp(&mut doc);

        let id = self.store.insert_one(R::KIND.collection, doc.clone()).await?;
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        tracing::info!(collection = %R::KIND.collection, id = %id, "Document created");
        Ok(Envelope::created(
            format!("{} created successfully", R::KIND.label),
            keyed(R::KIND.singular, Value::Object(doc)),
        ))
    }

    /// Replace a document's content.
    pub async fn update(&self, scope: Scope, id: ObjectId, payload: Option<R>) -> ApiResult<Envelope> {
        let mut doc = payload.unwrap_or_else(R::sample_revision).into_document()?;
        doc.remove(ID_FIELD);
        scope.stamp(&mut doc);

        let result = self
            .store
            .update_one(R::KIND.collection, &scope.one(id), doc.clone())
            .await?;
        if result.matched_count == 0 {
            return Err(ApiError::not_found(R::KIND));
        }
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        tracing::info!(collection = %R::KIND.collection, id = %id, "Document updated");
        Ok(Envelope::updated(
            format!("{} updated successfully", R::KIND.label),
            keyed(R::KIND.singular, Value::Object(doc)),
        ))
    }

    /// Remove a document.
    pub async fn delete(&self, scope: Scope, id: ObjectId) -> ApiResult<Envelope> {
        let result = self
            .store
            .delete_one(R::KIND.collection, &scope.one(id))
            .await?;
        if result.deleted_count == 0 {
            return Err(ApiError::not_found(R::KIND));
        }

        tracing::info!(collection = %R::KIND.collection, id = %id, "Document deleted");
        Ok(Envelope::ok(keyed(
            R::KIND.singular,
            json!({
                "acknowledged": result.acknowledged,
                "deletedCount": result.deleted_count,
            }),
        )))
    }

    /// True if a document with `id` exists at the top level.
    pub async fn exists(&self, id: ObjectId) -> ApiResult<bool> {
        let doc = self
            .store
            .find_one(R::KIND.collection, &Scope::root().one(id))
            .await?;
        Ok(doc.is_some())
    }

    async fn find(&self, scope: Scope, id: ObjectId) -> ApiResult<Document> {
        self.store
            .find_one(R::KIND.collection, &scope.one(id))
            .await?
            .ok_or_else(|| ApiError::not_found(R::KIND))
    }
}

/// Wrap `value` under `key`.
fn keyed(key: &str, value: Value) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
