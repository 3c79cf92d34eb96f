use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    config::{Config, StoreBackend},
    infrastructure::{DocumentBackend, DocumentStore, MemoryBackend, MongoBackend},
    models::PostDoc,
    repositories::{CommentRepository, CommentStore, PostStore, Repository},
};

/// Shared by every handler. Cloning is cheap; the store client is shared, not copied.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn Repository<PostDoc>>,
    pub comments: Arc<dyn CommentRepository>,
    pub store: DocumentStore,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let backend: Arc<dyn DocumentBackend> = match config.database.backend {
            StoreBackend::MongoDb => {
                Arc::new(MongoBackend::connect(&config.database, config.timeouts.request).await?)
            }
            StoreBackend::Memory => {
                warn!("Using the in-memory store; data will not survive a restart");
                Arc::new(MemoryBackend::new())
            }
        };

        // Fail fast when the store is unreachable
        let store = DocumentStore::new(backend, config.timeouts.request);
        store.ping().await?;
        info!("Connected to document store, database {:?}", config.database.name);

        Ok(Self::from_store(store, &config.database.name))
    }

    /// Wire both repositories onto an already built store.
    pub fn from_store(store: DocumentStore, db_name: &str) -> Self {
        Self {
            posts: Arc::new(PostStore::in_database(store.clone(), db_name)),
            comments: Arc::new(CommentStore::in_database(store.clone(), db_name)),
            store,
        }
    }
}
