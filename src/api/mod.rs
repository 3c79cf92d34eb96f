// HTTP API - routes REST verbs on posts and comments to the repositories

pub mod comments;
pub mod posts;
pub mod response;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use mongodb::bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::infrastructure::middleware::{record_operation, request_context_middleware};
use crate::models::parse_object_id;
use response::write_json;

/// Decode a JSON request body. Any malformed or mistyped body is a client error.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Tag the request span with `operation` and the raw id, then parse the id.
/// An id the router could not decode is reported like any other malformed id.
pub(crate) fn path_id(
    operation: &'static str,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<ObjectId> {
    match path {
        Ok(Path(raw)) => {
            record_operation(operation, Some(&raw));
            parse_object_id(&raw)
        }
        Err(rejection) => {
            record_operation(operation, None);
            Err(rejection.into())
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> AppResult<Response> {
    state
        .store
        .ping()
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.message().to_string()))?;
    Ok(write_json(StatusCode::OK, json!({ "status": "ok" })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Posts
        .route("/post/", post(posts::create_post))
        .route(
            "/post/{id}",
            get(posts::read_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        // Comments
        .route("/comment/", post(comments::create_comment))
        .route(
            "/comment/{id}",
            get(comments::read_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_context_middleware))
        .with_state(state)
}
