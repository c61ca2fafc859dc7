pub mod memory;
pub mod sqlite;

pub use linkhop_core::repository::{ReadRepository, Repository};
pub use linkhop_core::StorageError;
pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
