use crate::error::StorageError;
use crate::link::LinkMapping;
use crate::token::Token;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the mapping for a given token.
    /// Returns `None` if the token is not bound.
    async fn get(&self, token: &Token) -> Result<Option<LinkMapping>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Atomically inserts a new mapping if its token is free.
    ///
    /// Returns `Err(StorageError::Conflict)` if the token is already bound;
    /// the existing mapping is left untouched.
    async fn insert(&self, mapping: LinkMapping) -> Result<()>;
}
