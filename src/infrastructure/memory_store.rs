// In-memory backend - used by tests and by DB_BACKEND=memory for local runs

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document as BsonDocument};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::DocumentBackend;

type Collection = HashMap<ObjectId, BsonDocument>;

#[derive(Default)]
pub struct MemoryBackend {
    // keyed by (database, collection)
    collections: RwLock<HashMap<(String, String), Collection>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub async fn count(&self, db: &str, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(&key(db, collection))
            .map_or(0, HashMap::len)
    }
}

fn key(db: &str, collection: &str) -> (String, String) {
    (db.to_string(), collection.to_string())
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn insert_one(&self, db: &str, collection: &str, mut doc: BsonDocument) -> AppResult<ObjectId> {
        let id = doc.get_object_id("_id").unwrap_or_else(|_| ObjectId::new());
        doc.insert("_id", id);

        let mut collections = self.collections.write().await;
        let docs = collections.entry(key(db, collection)).or_default();
        if docs.contains_key(&id) {
            return Err(AppError::DatabaseError(format!(
                "duplicate key error: {}.{} already holds _id {}",
                db, collection, id
            )));
        }
        docs.insert(id, doc);
        Ok(id)
    }

    async fn find_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<Option<BsonDocument>> {
        Ok(self
            .collections
            .read()
            .await
            .get(&key(db, collection))
            .and_then(|docs| docs.get(&id))
            .cloned())
    }

    async fn replace_one(
        &self,
        db: &str,
        collection: &str,
        id: ObjectId,
        mut doc: BsonDocument,
    ) -> AppResult<u64> {
        let mut collections = self.collections.write().await;
        match collections
            .get_mut(&key(db, collection))
            .and_then(|docs| docs.get_mut(&id))
        {
            Some(slot) => {
                doc.insert("_id", id);
                *slot = doc;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<u64> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(&key(db, collection))
            .and_then(|docs| docs.remove(&id));
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
