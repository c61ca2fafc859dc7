//! Read-through caching for link mappings.
//!
//! Mappings are immutable once committed, so a cache in front of the
//! repository never needs invalidation. [`CachedRepository`] composes any
//! [`Repository`](linkhop_core::Repository) with any
//! [`LinkCache`](linkhop_core::LinkCache), and [`MokaLinkCache`] is the
//! bundled in-process cache.

pub mod cached;
pub mod moka;

pub use self::moka::{CacheConfig, MokaLinkCache};
pub use cached::CachedRepository;
