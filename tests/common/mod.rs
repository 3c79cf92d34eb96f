#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use mongodb::bson::{oid::ObjectId, Document as BsonDocument};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use posts_api::{
    api::create_router,
    app_state::AppState,
    infrastructure::{DocumentBackend, DocumentStore, MemoryBackend},
    AppResult,
};

pub const DB_NAME: &str = "test-db";

pub fn app_with(backend: Arc<dyn DocumentBackend>, timeout: Duration) -> Router {
    let store = DocumentStore::new(backend, timeout);
    create_router(AppState::from_store(store, DB_NAME))
}

/// Router over a fresh in-memory store, plus the backend for direct inspection.
pub fn memory_app() -> (Router, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    (app_with(backend.clone(), Duration::from_secs(1)), backend)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Create a post through the API and return its id.
pub async fn create_post(app: &Router, content: &str, author: &str) -> String {
    let body = serde_json::json!({ "content": content, "author": author }).to_string();
    let (status, json) = send(app, Method::POST, "/post/", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["id"].as_str().unwrap().to_string()
}

/// Memory backend that counts every call it receives.
#[derive(Default)]
pub struct CountingBackend {
    inner: MemoryBackend,
    calls: AtomicUsize,
}

impl CountingBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentBackend for CountingBackend {
    async fn insert_one(&self, db: &str, collection: &str, doc: BsonDocument) -> AppResult<ObjectId> {
        self.hit();
        self.inner.insert_one(db, collection, doc).await
    }

    async fn find_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<Option<BsonDocument>> {
        self.hit();
        self.inner.find_one(db, collection, id).await
    }

    async fn replace_one(
        &self,
        db: &str,
        collection: &str,
        id: ObjectId,
        doc: BsonDocument,
    ) -> AppResult<u64> {
        self.hit();
        self.inner.replace_one(db, collection, id, doc).await
    }

    async fn delete_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<u64> {
        self.hit();
        self.inner.delete_one(db, collection, id).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.hit();
        self.inner.ping().await
    }
}

/// Backend whose every call takes `delay` before answering from memory.
pub struct SlowBackend {
    inner: MemoryBackend,
    delay: Duration,
}

impl SlowBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryBackend::new(),
            delay,
        }
    }
}

#[async_trait]
impl DocumentBackend for SlowBackend {
    async fn insert_one(&self, db: &str, collection: &str, doc: BsonDocument) -> AppResult<ObjectId> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert_one(db, collection, doc).await
    }

    async fn find_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<Option<BsonDocument>> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_one(db, collection, id).await
    }

    async fn replace_one(
        &self,
        db: &str,
        collection: &str,
        id: ObjectId,
        doc: BsonDocument,
    ) -> AppResult<u64> {
        tokio::time::sleep(self.delay).await;
        self.inner.replace_one(db, collection, id, doc).await
    }

    async fn delete_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<u64> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete_one(db, collection, id).await
    }

    async fn ping(&self) -> AppResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.ping().await
    }
}
