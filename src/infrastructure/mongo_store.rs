// MongoDB backend - the production document store
// One pooled client is shared by every request; the driver handles concurrent use.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document as BsonDocument},
    options::ClientOptions,
    Client, Collection,
};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::DocumentBackend;

pub struct MongoBackend {
    client: Client,
}

impl MongoBackend {
    /// Build a client for the configured server. Connection and server selection
    /// are both bounded by `timeout`.
    pub async fn connect(config: &DatabaseConfig, timeout: Duration) -> AppResult<Self> {
        let mut options = ClientOptions::parse(config.connection_uri()).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        info!("MongoDB client configured for {}:{}", config.host, config.port);
        Ok(Self { client })
    }

    fn collection(&self, db: &str, collection: &str) -> Collection<BsonDocument> {
        self.client.database(db).collection(collection)
    }
}

#[async_trait]
impl DocumentBackend for MongoBackend {
    async fn insert_one(&self, db: &str, collection: &str, doc: BsonDocument) -> AppResult<ObjectId> {
        let result = self.collection(db, collection).insert_one(doc).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(format!(
                "store assigned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<Option<BsonDocument>> {
        Ok(self.collection(db, collection).find_one(doc! { "_id": id }).await?)
    }

    async fn replace_one(
        &self,
        db: &str,
        collection: &str,
        id: ObjectId,
        doc: BsonDocument,
    ) -> AppResult<u64> {
        let result = self
            .collection(db, collection)
            .replace_one(doc! { "_id": id }, doc)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, db: &str, collection: &str, id: ObjectId) -> AppResult<u64> {
        let result = self
            .collection(db, collection)
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
