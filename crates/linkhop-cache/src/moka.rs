use async_trait::async_trait;
use linkhop_core::cache::{LinkCache, Result};
use linkhop_core::{LinkMapping, Token};
use moka::future::Cache;
use std::time::Duration;
use tracing::trace;
use typed_builder::TypedBuilder;

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// An in-memory cache of link mappings backed by Moka.
///
/// Only committed mappings are ever stored; lookups for unknown tokens are
/// not remembered.
#[derive(Debug, Clone)]
pub struct MokaLinkCache {
    cache: Cache<Token, LinkMapping>,
}

impl MokaLinkCache {
    /// Creates a cache holding at most 10,000 mappings.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_capacity).build();
        Self { cache }
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }

    /// Approximate number of cached mappings.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for MokaLinkCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkCache for MokaLinkCache {
    async fn get(&self, token: &Token) -> Result<Option<LinkMapping>> {
        let found = self.cache.get(token).await;
        trace!(token = %token, hit = found.is_some(), "moka lookup");
        Ok(found)
    }

    async fn set(&self, mapping: &LinkMapping) -> Result<()> {
        self.cache
            .insert(mapping.token.clone(), mapping.clone())
            .await;
        trace!(token = %mapping.token, "cached mapping in moka");
        Ok(())
    }
}

/// Configuration for creating a MokaLinkCache with custom settings.
#[derive(Debug, TypedBuilder, Default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default, setter(strip_option))]
    max_capacity: Option<u64>,
    /// Time-to-live for cache entries.
    #[builder(default, setter(strip_option))]
    ttl: Option<Duration>,
    /// Time-to-idle for cache entries.
    #[builder(default, setter(strip_option))]
    tti: Option<Duration>,
}

impl From<CacheConfig> for MokaLinkCache {
    fn from(config: CacheConfig) -> Self {
        let mut builder =
            Cache::builder().max_capacity(config.max_capacity.unwrap_or(DEFAULT_MAX_CAPACITY));

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        if let Some(tti) = config.tti {
            builder = builder.time_to_idle(tti);
        }

        MokaLinkCache {
            cache: builder.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkhop_core::Destination;

    fn mapping(token: &str, url: &str) -> LinkMapping {
        LinkMapping::new(Token::new_unchecked(token), Destination::from_trusted(url))
    }

    #[tokio::test]
    async fn cache_get_and_set() {
        let cache = MokaLinkCache::new();
        let m = mapping("abc123", "https://example.com");

        cache.set(&m).await.unwrap();

        let got = cache.get(&m.token).await.unwrap();
        assert_eq!(got, Some(m));
    }

    #[tokio::test]
    async fn cache_miss() {
        let cache = MokaLinkCache::new();

        let got = cache.get(&Token::new_unchecked("nope")).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn ttl_expires_entries() {
        let cache: MokaLinkCache = MokaLinkCache::builder()
            .max_capacity(10)
            .ttl(Duration::from_millis(50))
            .build()
            .into();
        let m = mapping("short", "https://example.com");

        cache.set(&m).await.unwrap();
        assert!(cache.get(&m.token).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.get(&m.token).await.unwrap().is_none());
    }
}
