//! Cross-cutting HTTP layers.

mod latency;
mod server_errors;
mod trace;

pub use latency::{latency_header, LATENCY_HEADER};
pub use server_errors::{log_server_errors, panic_response, MAX_BUFFERED_BODY_BYTES};
pub use trace::trace_layer;
