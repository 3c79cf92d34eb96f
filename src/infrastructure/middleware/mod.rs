// Request context middleware - per-request id and tracing span

pub mod request_context;

pub use request_context::*;
