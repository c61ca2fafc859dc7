use crate::error::CacheError;
use crate::link::LinkMapping;
use crate::token::Token;
use async_trait::async_trait;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A cache of committed link mappings keyed by token.
///
/// Mappings never change once committed, so cached entries never need
/// invalidation. Implementations must only hold mappings that have been
/// committed to the backing repository.
#[async_trait]
pub trait LinkCache: Send + Sync + 'static {
    /// Returns `Ok(None)` if the token is not cached.
    async fn get(&self, token: &Token) -> Result<Option<LinkMapping>>;

    async fn set(&self, mapping: &LinkMapping) -> Result<()>;
}
