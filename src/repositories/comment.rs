use mongodb::bson::oid::ObjectId;

use super::{DocumentRepository, Repository};
use crate::infrastructure::document_store::DocumentStore;
use crate::models::CommentDoc;

pub const COMMENTS_COLLECTION: &str = "comments";

/// Comment CRUD plus access to the post a comment belongs to.
pub trait CommentRepository: Repository<CommentDoc> {
    /// Post referenced by `comment`. Reads the embedded reference, no store access.
    fn related_post_id(&self, comment: &CommentDoc) -> ObjectId {
        comment.post_id
    }
}

pub type CommentStore = DocumentRepository<CommentDoc>;

impl CommentStore {
    pub fn in_database(store: DocumentStore, db_name: impl Into<String>) -> Self {
        Self::new(store, db_name, COMMENTS_COLLECTION)
    }
}

impl CommentRepository for CommentStore {}
