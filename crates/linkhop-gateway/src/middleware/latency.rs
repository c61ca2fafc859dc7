use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

pub const LATENCY_HEADER: HeaderName = HeaderName::from_static("x-latency");

/// Adds `X-Latency: <milliseconds>ms` to every response.
pub async fn latency_header(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed_ms:.2}ms")) {
        response.headers_mut().insert(LATENCY_HEADER, value);
    }

    response
}
