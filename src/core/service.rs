//! Service trait for record stores

use crate::core::entity::{EntityId, Record};
use crate::core::store::ListQuery;
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing the records of one kind
///
/// Implementations provide CRUD operations for a specific record type.
/// The list endpoints only ever call `query` (and `count` for the index
/// page); the write operations exist for seeding and tests.
#[async_trait]
pub trait DataService<T: Record>: Send + Sync {
    /// Create a new record; the store assigns the identifier
    async fn create(&self, record: T) -> Result<T>;

    /// Get a record by ID
    async fn get(&self, id: EntityId) -> Result<Option<T>>;

    /// List all records, identifier ascending
    async fn list(&self) -> Result<Vec<T>>;

    /// Update an existing record
    async fn update(&self, id: EntityId, record: T) -> Result<T>;

    /// Delete a record
    async fn delete(&self, id: EntityId) -> Result<()>;

    /// Number of stored records
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }

    /// Run a list query
    ///
    /// The default filters `list()` in memory. Stores that can evaluate the
    /// predicate natively may override this, as long as matching and
    /// ordering stay identical.
    async fn query(&self, query: &ListQuery) -> Result<Vec<T>> {
        Ok(query.apply(self.list().await?))
    }
}
