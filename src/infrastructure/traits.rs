use crate::error::AppResult;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document as BsonDocument};

/// Raw single-document operations against a named database and collection.
///
/// Implementations move BSON documents only; typing, timeouts and the
/// not-found taxonomy live in [`crate::infrastructure::document_store`].
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Insert one document and return the identifier the store assigned.
    async fn insert_one(&self, db: &str, collection: &str, doc: BsonDocument) -> AppResult<ObjectId>;

    async fn find_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<Option<BsonDocument>>;

    /// Replace the document at `id`, returning how many documents matched.
    async fn replace_one(
        &self,
        db: &str,
        collection: &str,
        id: ObjectId,
        doc: BsonDocument,
    ) -> AppResult<u64>;

    /// Delete the document at `id`, returning how many documents were removed.
    async fn delete_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<u64>;

    async fn ping(&self) -> AppResult<()>;
}
