use crate::error::internal_server_error;
use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use std::any::Any;
use tracing::{error, warn};

/// Same ceiling as axum's default body limit.
pub const MAX_BUFFERED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Logs the request URI and body of every request answered with a 5xx.
///
/// The body is buffered up front so it is still available once the inner
/// service has consumed the request.
pub async fn log_server_errors(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let uri = parts.uri.clone();

    let body = match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%method, %uri, error = %e, "could not read request body");
            // mirror axum's own body limit rejection
            if e.into_inner().is::<LengthLimitError>() {
                return (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large").into_response();
            }
            return (StatusCode::BAD_REQUEST, "could not read request body").into_response();
        }
    };

    let response = next
        .run(Request::from_parts(parts, Body::from(body.clone())))
        .await;

    let status = response.status();
    if status.is_server_error() {
        match std::str::from_utf8(&body) {
            Ok(text) => error!(%method, %uri, %status, body = text, "request failed"),
            Err(_) => error!(
                %method,
                %uri,
                %status,
                "request failed; could not read request body"
            ),
        }
    }

    response
}

/// Converts a handler panic into the generic 500 response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    error!(panic = message, "handler panicked");
    internal_server_error()
}
