//! In-process document store.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::resource::locator::Filter;
use crate::resource::ObjectId;
use crate::store::{
    Collection, DeleteResult, Document, Store, StoreError, StoreResult, UpdateResult, ID_FIELD,
};

type Documents = BTreeMap<ObjectId, Document>;

/// Concurrent store keeping each collection ordered by identifier.
///
/// Cloning shares the underlying data. Every operation holds the collection's
/// shard lock for its duration, which makes single-document writes atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<Collection, Documents>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let collections = DashMap::new();
        for collection in Collection::ALL {
            collections.insert(collection, Documents::new());
        }
        Self {
            collections: Arc::new(collections),
        }
    }

    /// Load documents from a JSON file shaped like
    /// `{"movies": [...], "comments": [...], "theaters": [...]}`.
    pub fn load_from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let file = File::open(path.as_ref())?;
        let seed: HashMap<String, Vec<Value>> = serde_json::from_reader(BufReader::new(file))?;

        let store = Self::new();
        for (name, docs) in seed {
            let Some(collection) = Collection::from_name(&name) else {
                tracing::warn!(collection = %name, "Ignoring unknown collection in seed file");
                continue;
            };
            for value in docs {
                let Value::Object(doc) = value else {
                    return Err(StoreError::InvalidDocument {
                        collection,
                        reason: "seed entry is not an object".to_string(),
                    });
                };
                store.insert(collection, doc)?;
            }
        }

        tracing::info!(
            path = %path.as_ref().display(),
            movies = store.len(Collection::Movies),
            comments = store.len(Collection::Comments),
            theaters = store.len(Collection::Theaters),
            "Loaded seed documents"
        );
        Ok(store)
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections.get(&collection).map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.collections.iter().all(|c| c.is_empty())
    }

    fn insert(&self, collection: Collection, mut doc: Document) -> StoreResult<ObjectId> {
        let id = match doc.get(ID_FIELD) {
            None => ObjectId::generate(),
            Some(Value::String(s)) => ObjectId::parse(s).map_err(|e| StoreError::InvalidDocument {
                collection,
                reason: format!("{}: {}", e, s),
            })?,
            Some(other) => {
                return Err(StoreError::InvalidDocument {
                    collection,
                    reason: format!("_id must be a string, got {}", other),
                })
            }
        };
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        let mut docs = self.collections.entry(collection).or_default();
        if docs.contains_key(&id) {
            return Err(StoreError::Backend(format!(
                "duplicate key in {}: _id {}",
                collection, id
            )));
        }
        docs.insert(id, doc);
        Ok(id)
    }
}

/// Key of the first document in `docs` matching `filter`.
fn first_match(docs: &Documents, filter: &Filter) -> Option<ObjectId> {
    match filter.id() {
        // Identifier lookups skip the scan.
        Some(id) => docs
            .get(&id)
            .filter(|doc| filter.matches(doc))
            .map(|_| id),
        None => docs
            .iter()
            .find(|(_, doc)| filter.matches(doc))
            .map(|(id, _)| *id),
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>> {
        let Some(docs) = self.collections.get(&collection) else {
            return Ok(None);
        };
        Ok(first_match(&docs, filter).and_then(|id| docs.get(&id).cloned()))
    }

    async fn find(&self, collection: Collection, filter: &Filter, limit: usize) -> StoreResult<Vec<Document>> {
        let Some(docs) = self.collections.get(&collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .values()
            .filter(|doc| filter.matches(doc))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<ObjectId> {
        self.insert(collection, doc)
    }

    async fn update_one(&self, collection: Collection, filter: &Filter, replacement: Document) -> StoreResult<UpdateResult> {
        let mut docs = self.collections.entry(collection).or_default();
        let Some(id) = first_match(&docs, filter) else {
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            });
        };

        let mut next = replacement;
        next.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
        let modified = docs.get(&id) != Some(&next);
        docs.insert(id, next);

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<DeleteResult> {
        let mut docs = self.collections.entry(collection).or_default();
        let deleted = first_match(&docs, filter).and_then(|id| docs.remove(&id));
        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: u64::from(deleted.is_some()),
        })
    }
}
