// Core infrastructure modules
pub mod document_store;        // Typed store adapter with per-call timeouts
pub mod memory_store;          // In-process backend
pub mod middleware;            // Request context middleware
pub mod mongo_store;           // MongoDB backend
pub mod traits;                // Infrastructure traits

// Re-export core infrastructure components
pub use document_store::{delete_by_id, find_by_id, insert, replace_by_id, DocumentStore};
pub use memory_store::MemoryBackend;
pub use mongo_store::MongoBackend;
pub use traits::DocumentBackend;
