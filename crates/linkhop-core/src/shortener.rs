use crate::link::Destination;
use crate::token::Token;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// The link mapping store as seen by the transport layer.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Binds a fresh token to an already validated destination.
    async fn create_link(&self, destination: Destination) -> Result<Token>;

    /// Resolves a token to its destination.
    /// Returns `None` if nothing is bound to the token.
    async fn get_real_link(&self, token: &str) -> Result<Option<Destination>>;
}
