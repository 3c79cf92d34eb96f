// Repositories - per-entity CRUD over the document store adapter
// Handlers depend on the capability traits so tests can substitute doubles.

pub mod comment;
pub mod post;

pub use comment::{CommentRepository, CommentStore, COMMENTS_COLLECTION};
pub use post::{PostStore, POSTS_COLLECTION};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::marker::PhantomData;

use crate::error::AppResult;
use crate::infrastructure::document_store::{self, DocumentStore};
use crate::models::Document;

/// Create/read/update/delete for one document shape.
///
/// `update` and `delete` do not check existence first; callers that need to
/// tell "missing" apart from a store failure read before writing.
#[async_trait]
pub trait Repository<D: Document>: Send + Sync {
    async fn create(&self, document: &D) -> AppResult<ObjectId>;
    async fn read(&self, id: ObjectId) -> AppResult<D>;
    async fn update(&self, id: ObjectId, document: &D) -> AppResult<()>;
    async fn delete(&self, id: ObjectId) -> AppResult<()>;
}

/// Repository bound to one database and collection of the shared store.
pub struct DocumentRepository<D> {
    store: DocumentStore,
    db_name: String,
    collection: String,
    _shape: PhantomData<fn() -> D>,
}

impl<D: Document> DocumentRepository<D> {
    pub fn new(store: DocumentStore, db_name: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            store,
            db_name: db_name.into(),
            collection: collection.into(),
            _shape: PhantomData,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl<D: Document> Repository<D> for DocumentRepository<D> {
    async fn create(&self, document: &D) -> AppResult<ObjectId> {
        document_store::insert(&self.store, &self.db_name, &self.collection, document).await
    }

    async fn read(&self, id: ObjectId) -> AppResult<D> {
        document_store::find_by_id(&self.store, &self.db_name, &self.collection, id).await
    }

    async fn update(&self, id: ObjectId, document: &D) -> AppResult<()> {
        document_store::replace_by_id(&self.store, &self.db_name, &self.collection, id, document)
            .await
    }

    async fn delete(&self, id: ObjectId) -> AppResult<()> {
        document_store::delete_by_id::<D>(&self.store, &self.db_name, &self.collection, id).await
    }
}
