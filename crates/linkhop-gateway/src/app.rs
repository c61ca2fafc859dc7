use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use crate::handlers::{create_link_handler, health_handler, redirect_handler};
use crate::middleware::{latency_header, log_server_errors, panic_response, trace_layer};
use crate::state::AppState;

/// Static paths that shadow any token with the same text.
pub const RESERVED_PATHS: &[&str] = &["health", "link"];

pub struct App {}

impl App {
    /// Builds the gateway router.
    ///
    /// Layers, outermost first: latency header, request tracing, 5xx
    /// logging with the buffered request body, panic to 500 conversion.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/link", post(create_link_handler))
            .route("/{token}", get(redirect_handler))
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(axum::middleware::from_fn(log_server_errors))
            .layer(trace_layer())
            .layer(axum::middleware::from_fn(latency_header))
    }
}
