// Post handlers - /post/ and /post/{id}

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Response,
};
use serde_json::json;
use tracing::info;

use super::{decode_body, path_id, response::write_json};
use crate::app_state::AppState;
use crate::error::AppResult;
use crate::infrastructure::middleware::record_operation;
use crate::models::{PostDoc, PostPayload, PostView};
use crate::repositories::Repository;

pub async fn create_post(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    record_operation("create_post", None);
    let payload: PostPayload = decode_body(&body?)?;
    let mut post = PostDoc::from(payload);

    let id = state.posts.create(&post).await?;
    post.id = Some(id);
    info!(%id, "post created");

    Ok(write_json(StatusCode::CREATED, PostView::from(post)))
}

pub async fn read_post(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    let id = path_id("read_post", path)?;
    let post = state.posts.read(id).await?;

    Ok(write_json(StatusCode::OK, PostView::from(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    let id = path_id("update_post", path)?;
    // Existence check so a missing post is a 404 rather than a store failure.
    // A delete landing between this read and the write is not guarded against.
    state.posts.read(id).await?;

    let payload: PostPayload = decode_body(&body?)?;
    state.posts.update(id, &PostDoc::from(payload)).await?;
    info!(%id, "post updated");

    Ok(write_json(StatusCode::OK, json!({ "msj": "post updated" })))
}

pub async fn delete_post(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    let id = path_id("delete_post", path)?;
    state.posts.read(id).await?;

    state.posts.delete(id).await?;
    info!(%id, "post deleted");

    Ok(write_json(StatusCode::OK, json!({ "msj": "post deleted" })))
}
