use thiserror::Error;

/// The candidate destination has no network location after normalization.
///
/// Carries the normalized link so callers can echo it back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid link: {link}")]
pub struct InvalidLinkError {
    pub link: String,
}

impl InvalidLinkError {
    pub fn new(link: impl Into<String>) -> Self {
        Self { link: link.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTokenError {
    #[error("token length must be between {min} and {max}, got {len}")]
    Length { min: usize, max: usize, len: usize },
    #[error("token must contain only alphanumeric characters, hyphens, or underscores: '{0}'")]
    Charset(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("token already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("no free token found after {attempts} attempts")]
    TokenSpaceExhausted { attempts: usize },
    #[error("generator produced an unusable token: {0}")]
    InvalidGeneratedToken(InvalidTokenError),
}
