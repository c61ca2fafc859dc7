use async_trait::async_trait;
use linkhop_core::repository::Result;
use linkhop_core::{LinkCache, LinkMapping, ReadRepository, Repository, Token};
use tracing::{trace, warn};

/// A repository decorator that adds read-through caching.
///
/// Reads check the cache first and fall back to the inner repository;
/// mappings found there are cached. Inserts are written to the inner
/// repository and cached only once they have committed, so the cache never
/// holds a mapping the repository does not. Cache failures are logged and
/// bypassed.
#[derive(Debug, Clone)]
pub struct CachedRepository<R, C> {
    inner: R,
    cache: C,
}

impl<R: Repository, C: LinkCache> CachedRepository<R, C> {
    pub fn new(inner: R, cache: C) -> Self {
        Self { inner, cache }
    }

    /// Returns a reference to the inner repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    async fn remember(&self, mapping: &LinkMapping) {
        if let Err(e) = self.cache.set(mapping).await {
            warn!(token = %mapping.token, error = %e, "failed to cache mapping");
        }
    }
}

#[async_trait]
impl<R: Repository, C: LinkCache> ReadRepository for CachedRepository<R, C> {
    async fn get(&self, token: &Token) -> Result<Option<LinkMapping>> {
        match self.cache.get(token).await {
            Ok(Some(mapping)) => return Ok(Some(mapping)),
            Ok(None) => trace!(token = %token, "cache miss, reading inner repository"),
            Err(e) => {
                warn!(token = %token, error = %e, "cache error, falling back to inner repository")
            }
        }

        let found = self.inner.get(token).await?;
        if let Some(mapping) = &found {
            self.remember(mapping).await;
        }
        Ok(found)
    }
}

#[async_trait]
impl<R: Repository, C: LinkCache> Repository for CachedRepository<R, C> {
    async fn insert(&self, mapping: LinkMapping) -> Result<()> {
        self.inner.insert(mapping.clone()).await?;
        self.remember(&mapping).await;
        Ok(())
    }
}
