// Response writer - uniform JSON bodies for success and error replies

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Serialize `body` as JSON with the given status.
pub fn write_json<T: Serialize>(code: StatusCode, body: T) -> Response {
    (code, Json(body)).into_response()
}

/// Log `message`, then reply with `{"error": message}`.
pub fn write_error(code: StatusCode, message: &str) -> Response {
    if code.is_server_error() {
        tracing::error!(status = code.as_u16(), "{}", message);
    } else {
        tracing::warn!(status = code.as_u16(), "{}", message);
    }
    write_json(code, json!({ "error": message }))
}
