// Posts & comments API - CRUD over a MongoDB document store

// HTTP layer - handlers, routing and response writer
pub mod api;

// Document shapes and id parsing
pub mod models;

// Per-entity repositories over the store adapter
pub mod repositories;

// Store adapter, backends and middleware
pub mod infrastructure;

// Process glue
pub mod app_state;
pub mod config;
pub mod server;

// Common utilities
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
