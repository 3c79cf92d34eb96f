use super::DocumentRepository;
use crate::infrastructure::document_store::DocumentStore;
use crate::models::PostDoc;

pub const POSTS_COLLECTION: &str = "posts";

pub type PostStore = DocumentRepository<PostDoc>;

impl PostStore {
    pub fn in_database(store: DocumentStore, db_name: impl Into<String>) -> Self {
        Self::new(store, db_name, POSTS_COLLECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::memory_store::MemoryBackend;
    use crate::repositories::Repository;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_post_lifecycle() {
        let store = DocumentStore::new(Arc::new(MemoryBackend::new()), Duration::from_secs(1));
        let posts = PostStore::in_database(store, "db");
        assert_eq!(posts.collection(), POSTS_COLLECTION);

        let id = posts.create(&PostDoc::new("hello", "gus")).await.unwrap();
        assert_eq!(posts.read(id).await.unwrap().content, "hello");

        posts.update(id, &PostDoc::new("bye", "gus")).await.unwrap();
        assert_eq!(posts.read(id).await.unwrap().content, "bye");

        posts.delete(id).await.unwrap();
        assert!(matches!(posts.read(id).await.unwrap_err(), AppError::NotFound(_)));
        assert!(matches!(posts.delete(id).await.unwrap_err(), AppError::NotFound(_)));
    }
}
