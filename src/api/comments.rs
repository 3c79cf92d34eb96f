// Comment handlers - /comment/ and /comment/{id}

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
use crate::models::{CommentPayload, CommentView};
use crate::repositories::{CommentRepository, Repository};

pub async fn create_comment(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    record_operation("create_comment", None);
    let payload: CommentPayload = decode_body(&body?)?;
    let mut comment = payload.into_doc()?;

    // The store does not enforce the reference, so the post must exist before the insert
    let post_id = state.comments.related_post_id(&comment);
    state.posts.read(post_id).await?;

    let id = state.comments.create(&comment).await?;
    comment.id = Some(id);
    info!(%id, %post_id, "comment created");

    Ok(write_json(StatusCode::CREATED, CommentView::from(comment)))
}

pub async fn read_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    let id = path_id("read_comment", path)?;
    let comment = state.comments.read(id).await?;

    Ok(write_json(StatusCode::OK, CommentView::from(comment)))
}

pub async fn update_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    let id = path_id("update_comment", path)?;
    state.comments.read(id).await?;

    let comment = decode_body::<CommentPayload>(&body?)?.into_doc()?;
    state.comments.update(id, &comment).await?;
    info!(%id, "comment updated");

    Ok(write_json(StatusCode::OK, json!({ "msj": "comment updated" })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    let id = path_id("delete_comment", path)?;
    state.comments.read(id).await?;

    state.comments.delete(id).await?;
    info!(%id, "comment deleted");

    Ok(write_json(StatusCode::OK, json!({ "msj": "comment deleted" })))
}
