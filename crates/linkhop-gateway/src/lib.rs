//! HTTP gateway for the linkhop URL shortener.
//!
//! Thin transport over [`Shortener`](linkhop_core::Shortener): request
//! parsing, status code translation, latency headers and request logging.

pub mod app;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
