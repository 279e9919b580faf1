//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use mflix_api::config::ApiConfig;
use mflix_api::resource::{Filter, ObjectId};
use mflix_api::store::{
    Collection, DeleteResult, Document, MemoryStore, Store, StoreError, StoreResult, UpdateResult,
};
use mflix_api::HttpServer;

/// Build the full application router over `store`.
pub fn app(store: Arc<dyn Store>) -> Router {
    app_with(ApiConfig::default(), store)
}

pub fn app_with(config: ApiConfig, store: Arc<dyn Store>) -> Router {
    HttpServer::new(config, store).router()
}

/// Send one request through the router and decode the JSON envelope.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let body = match body {
        Some(text) => Body::from(text.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// Pull the created document's id out of a 201 envelope.
pub fn created_id(envelope: &Value, key: &str) -> String {
    envelope["data"][key]["_id"].as_str().unwrap().to_string()
}

/// A store that must never be reached.
pub struct PanicStore;

#[async_trait]
impl Store for PanicStore {
    async fn find_one(&self, _: Collection, _: &Filter) -> StoreResult<Option<Document>> {
        panic!("store reached: find_one")
    }

    async fn find(&self, _: Collection, _: &Filter, _: usize) -> StoreResult<Vec<Document>> {
        panic!("store reached: find")
    }

    async fn insert_one(&self, _: Collection, _: Document) -> StoreResult<ObjectId> {
        panic!("store reached: insert_one")
    }

    async fn update_one(&self, _: Collection, _: &Filter, _: Document) -> StoreResult<UpdateResult> {
        panic!("store reached: update_one")
    }

    async fn delete_one(&self, _: Collection, _: &Filter) -> StoreResult<DeleteResult> {
        panic!("store reached: delete_one")
    }
}

/// A store whose every call fails as if the database were down.
pub struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl Store for FailingStore {
    async fn find_one(&self, _: Collection, _: &Filter) -> StoreResult<Option<Document>> {
        down()
    }

    async fn find(&self, _: Collection, _: &Filter, _: usize) -> StoreResult<Vec<Document>> {
        down()
    }

    async fn insert_one(&self, _: Collection, _: Document) -> StoreResult<ObjectId> {
        down()
    }

    async fn update_one(&self, _: Collection, _: &Filter, _: Document) -> StoreResult<UpdateResult> {
        down()
    }

    async fn delete_one(&self, _: Collection, _: &Filter) -> StoreResult<DeleteResult> {
        down()
    }
}

/// Wraps a `MemoryStore` and counts calls.
#[derive(Clone, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>> {
        self.tick();
        self.inner.find_one(collection, filter).await
    }

    async fn find(&self, collection: Collection, filter: &Filter, limit: usize) -> StoreResult<Vec<Document>> {
        self.tick();
        self.inner.find(collection, filter, limit).await
    }

    async fn insert_one(&self, collection: Collection, doc: Document) -> StoreResult<ObjectId> {
        self.tick();
        self.inner.insert_one(collection, doc).await
    }

    async fn update_one(&self, collection: Collection, filter: &Filter, replacement: Document) -> StoreResult<UpdateResult> {
        self.tick();
        self.inner.update_one(collection, filter, replacement).await
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<DeleteResult> {
        self.tick();
        self.inner.delete_one(collection, filter).await
    }
}
