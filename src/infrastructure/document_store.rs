// Document Store Adapter - typed single-document operations over a DocumentBackend
// Every call is bounded by the store's per-call timeout.

use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::DocumentBackend;
use crate::models::Document;

/// Shared handle to the backend plus the bound applied to each call.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn DocumentBackend>,
    call_timeout: Duration,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn DocumentBackend>, call_timeout: Duration) -> Self {
        Self {
            backend,
            call_timeout,
        }
    }

    /// Liveness check against the backend.
    pub async fn ping(&self) -> AppResult<()> {
        self.bounded("ping", self.backend.ping()).await
    }

    async fn bounded<T>(&self, operation: &str, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::TimeoutError(format!(
                "{} timed out after {:?}",
                operation, self.call_timeout
            ))),
        }
    }
}

fn not_found<D: Document>(id: ObjectId) -> AppError {
    AppError::NotFound(format!("no {} found with id {}", D::KIND, id))
}

/// Insert one document and return the identifier assigned by the store.
pub async fn insert<D: Document>(
    store: &DocumentStore,
    db_name: &str,
    collection: &str,
    document: &D,
) -> AppResult<ObjectId> {
    let doc = document.to_bson()?;
    store
        .bounded("insert", store.backend.insert_one(db_name, collection, doc))
        .await
}

pub async fn find_by_id<D: Document>(
    store: &DocumentStore,
    db_name: &str,
    collection: &str,
    id: ObjectId,
) -> AppResult<D> {
    let found = store
        .bounded("find", store.backend.find_one(db_name, collection, id))
        .await?;
    match found {
        Some(doc) => D::from_bson(doc),
        None => Err(not_found::<D>(id)),
    }
}

/// Replace every field of the document at `id`.
pub async fn replace_by_id<D: Document>(
    store: &DocumentStore,
    db_name: &str,
    collection: &str,
    id: ObjectId,
    document: &D,
) -> AppResult<()> {
    let doc = document.to_bson()?;
    let matched = store
        .bounded("replace", store.backend.replace_one(db_name, collection, id, doc))
        .await?;
    if matched == 0 {
        return Err(not_found::<D>(id));
    }
    Ok(())
}

pub async fn delete_by_id<D: Document>(
    store: &DocumentStore,
    db_name: &str,
    collection: &str,
    id: ObjectId,
) -> AppResult<()> {
    let deleted = store
        .bounded("delete", store.backend.delete_one(db_name, collection, id))
        .await?;
    if deleted == 0 {
        return Err(not_found::<D>(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::MemoryBackend;
    use crate::models::{CommentDoc, PostDoc};
    use async_trait::async_trait;
    use mongodb::bson::Document as BsonDocument;

    fn memory_store() -> DocumentStore {
        DocumentStore::new(Arc::new(MemoryBackend::new()), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = memory_store();
        let post = PostDoc::new("fake content", "fake author");

        let id = insert(&store, "db", "posts", &post).await.unwrap();
        let found: PostDoc = find_by_id(&store, "db", "posts", id).await.unwrap();

        assert_eq!(found.id, Some(id));
        assert_eq!(found.content, "fake content");
        assert_eq!(found.author, "fake author");
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let store = memory_store();
        let id = ObjectId::new();

        let err = find_by_id::<PostDoc>(&store, "db", "posts", id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = replace_by_id(&store, "db", "posts", id, &PostDoc::new("a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = delete_by_id::<CommentDoc>(&store, "db", "comments", id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(err.message().contains("comment"));
    }

    #[tokio::test]
    async fn test_replace_overwrites_fields() {
        let store = memory_store();
        let id = insert(&store, "db", "posts", &PostDoc::new("before", "first"))
            .await
            .unwrap();

        replace_by_id(&store, "db", "posts", id, &PostDoc::new("after", "second"))
            .await
            .unwrap();

        let found: PostDoc = find_by_id(&store, "db", "posts", id).await.unwrap();
        assert_eq!(found.content, "after");
        assert_eq!(found.author, "second");
    }

    #[tokio::test]
    async fn test_delete_then_find_is_not_found() {
        let store = memory_store();
        let id = insert(&store, "db", "posts", &PostDoc::new("a", "b")).await.unwrap();

        delete_by_id::<PostDoc>(&store, "db", "posts", id).await.unwrap();

        let err = find_by_id::<PostDoc>(&store, "db", "posts", id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_store_error() {
        let store = memory_store();
        // A post has no `post` reference, so it cannot decode as a comment
        let id = insert(&store, "db", "posts", &PostDoc::new("a", "b")).await.unwrap();

        let err = find_by_id::<CommentDoc>(&store, "db", "posts", id).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    struct StalledBackend;

    #[async_trait]
    impl DocumentBackend for StalledBackend {
        async fn insert_one(&self, _: &str, _: &str, _: BsonDocument) -> AppResult<ObjectId> {
            std::future::pending().await
        }

        async fn find_one(&self, _: &str, _: &str, _: ObjectId) -> AppResult<Option<BsonDocument>> {
            std::future::pending().await
        }

        async fn replace_one(&self, _: &str, _: &str, _: ObjectId, _: BsonDocument) -> AppResult<u64> {
            std::future::pending().await
        }

        async fn delete_one(&self, _: &str, _: &str, _: ObjectId) -> AppResult<u64> {
            std::future::pending().await
        }

        async fn ping(&self) -> AppResult<()> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_calls_are_bounded_by_timeout() {
        let store = DocumentStore::new(Arc::new(StalledBackend), Duration::from_millis(20));

        let err = find_by_id::<PostDoc>(&store, "db", "posts", ObjectId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TimeoutError(_)));

        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, AppError::TimeoutError(_)));
    }
}
