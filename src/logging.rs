//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a request or response body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Binary bodies, such as spreadsheet downloads, are logged by size only.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    tracing::info!(
        "Received request: {parts:#?}\nbody: {}",
        body_summary(&body_bytes)
    );
    log_full_body("request", &body_bytes);

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    tracing::info!(
        "Sending response: {parts:#?}\nbody: {}",
        body_summary(&body_bytes)
    );
    log_full_body("response", &body_bytes);

    Response::from_parts(parts, Body::from(body_bytes))
}

/// The text logged at the `info` level for `body`.
fn body_summary(body: &Bytes) -> String {
    match std::str::from_utf8(body) {
        Ok(text) if text.len() > LOG_BODY_LENGTH_LIMIT => {
            format!("{:?}...", truncate(text, LOG_BODY_LENGTH_LIMIT))
        }
        Ok(text) => format!("{text:?}"),
        Err(_) => format!("<{} bytes of binary data>", body.len()),
    }
}

fn log_full_body(kind: &str, body: &Bytes) {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return;
    }

    if let Ok(text) = std::str::from_utf8(body) {
        tracing::debug!("Full {kind} body: {text:?}");
    }
}

/// Cut `text` to at most `limit` bytes without splitting a character.
fn truncate(text: &str, limit: usize) -> &str {
    let mut end = limit.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}
