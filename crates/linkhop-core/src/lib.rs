//! Core types and traits for the linkhop URL shortener.
//!
//! This crate provides the domain types shared by the shortener service,
//! the storage backends and the HTTP gateway, together with the link
//! validator that guards every write.

pub mod cache;
pub mod error;
pub mod link;
pub mod repository;
pub mod shortener;
pub mod token;
pub mod validator;

pub use cache::LinkCache;
pub use error::{CacheError, InvalidLinkError, InvalidTokenError, ShortenerError, StorageError};
pub use link::{Destination, LinkMapping};
pub use repository::{ReadRepository, Repository};
pub use shortener::Shortener;
pub use token::{Token, MAX_TOKEN_LENGTH};
pub use validator::validate_link;
