// Request context middleware
// Assigns every request an id and wraps the handler in a span so handler and
// store log lines carry it. Handlers tag the same span with their operation.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{field, info_span, Instrument, Span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let request_id = extract_request_id(request.headers())
        .unwrap_or_else(|| format!("req-{}", Uuid::new_v4()));

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        operation = field::Empty,
        id = field::Empty,
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Record the handler operation, and the raw path id when there is one, on the
/// request span. Error lines rendered after the handler returns still carry both.
pub fn record_operation(operation: &'static str, raw_id: Option<&str>) {
    let span = Span::current();
    span.record("operation", operation);
    if let Some(raw_id) = raw_id {
        span.record("id", raw_id);
    }
}

/// Honor a caller supplied id when it is printable and reasonably short.
fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
}
