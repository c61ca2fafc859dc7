//! The link mapping service.
//!
//! [`LinkService`] combines a [`Repository`](linkhop_core::Repository) with a
//! [`Generator`](linkhop_generator::Generator) and implements the
//! [`Shortener`](linkhop_core::Shortener) operations used by the gateway.

pub mod service;

pub use linkhop_core::ShortenerError;
pub use service::{LinkService, DEFAULT_MAX_ATTEMPTS};
