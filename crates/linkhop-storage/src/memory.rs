use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use linkhop_core::repository::{ReadRepository, Repository, Result};
use linkhop_core::{LinkMapping, StorageError, Token};

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap shards its locks, so concurrent reads and writes to different
/// buckets don't block each other. Inserts go through the entry API, which
/// holds the shard lock across the vacancy check and the write.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<Token, LinkMapping>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of committed mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, token: &Token) -> Result<Option<LinkMapping>> {
        Ok(self.storage.get(token).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, mapping: LinkMapping) -> Result<()> {
        match self.storage.entry(mapping.token.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(mapping.token.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(mapping);
                Ok(())
            }
        }
    }
}
