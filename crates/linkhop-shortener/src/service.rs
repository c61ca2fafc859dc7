use async_trait::async_trait;
use linkhop_core::{
    Destination, LinkMapping, Repository, Shortener, ShortenerError, StorageError, Token,
};
use linkhop_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Number of candidate tokens tried before `create_link` gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 8;

/// The link mapping store.
///
/// Wraps a `Repository` and a `Generator`. Candidate tokens come from the
/// generator; uniqueness is decided by the repository's atomic insert, and a
/// taken token is simply replaced by a fresh candidate.
#[derive(Debug)]
pub struct LinkService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R, G> Clone for LinkService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<R: Repository, G: Generator> LinkService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides how many candidates are tried per `create_link` call.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for LinkService<R, G> {
    async fn create_link(&self, destination: Destination) -> Result<Token, ShortenerError> {
        for attempt in 1..=self.max_attempts {
            let token: Token = self.generator.generate().into();
            // a token that cannot be parsed back would never resolve
            let token = Token::parse(token.as_str()).map_err(|e| {
                error!(token = %token, error = %e, "generator produced an unusable token");
                ShortenerError::InvalidGeneratedToken(e)
            })?;
            let mapping = LinkMapping::new(token.clone(), destination.clone());

            match self.repository.insert(mapping).await {
                Ok(()) => {
                    info!(token = %token, destination = %destination, "created short link");
                    return Ok(token);
                }
                Err(StorageError::Conflict(_)) => {
                    warn!(token = %token, attempt, "generated token already taken, retrying");
                }
                Err(e) => return Err(ShortenerError::Storage(e)),
            }
        }

        Err(ShortenerError::TokenSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn get_real_link(&self, token: &str) -> Result<Option<Destination>, ShortenerError> {
        let Ok(token) = Token::parse(token) else {
            trace!(token, "malformed token treated as not found");
            return Ok(None);
        };

        match self.repository.get(&token).await? {
            Some(mapping) => {
                debug!(token = %token, destination = %mapping.destination, "resolved token");
                Ok(Some(mapping.destination))
            }
            None => {
                trace!(token = %token, "token not found");
                Ok(None)
            }
        }
    }
}
