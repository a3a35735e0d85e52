//! In-memory implementation of DataService for testing and development

use crate::core::entity::{EntityId, Record};
use crate::core::error::StorageError;
use crate::core::service::DataService;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

struct Table<T> {
    next_id: EntityId,
    rows: BTreeMap<EntityId, T>,
}

impl<T: Record> Table<T> {
    /// Reject a record whose unique fields collide with another row.
    ///
    /// Empty text values are not checked, like NULL in a SQL unique index.
    fn check_unique(&self, record: &T, skip: Option<EntityId>) -> Result<(), StorageError> {
        for field in T::unique_fields() {
            let Some(value) = record.field_value(field) else {
                continue;
            };
            if value.is_null() || value.as_string() == Some("") {
                continue;
            }

            let taken = self
                .rows
                .values()
                .filter(|row| Some(row.id()) != skip)
                .any(|row| row.field_value(field).as_ref() == Some(&value));

            if taken {
                return Err(StorageError::IntegrityError {
                    message: format!("{} with this {} already exists", T::KIND, field),
                });
            }
        }
        Ok(())
    }
}

/// In-memory record service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// rows are kept in a `BTreeMap` so reads come back identifier ascending.
pub struct InMemoryDataService<T> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<T: Record> InMemoryDataService<T> {
    /// Create a new in-memory data service
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }
}

impl<T: Record> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, mut record: T) -> Result<T> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        table.check_unique(&record, None)?;

        let id = table.next_id;
        table.next_id += 1;
        record.assign_id(id);
        table.rows.insert(id, record.clone());

        Ok(record)
    }

    async fn get(&self, id: EntityId) -> Result<Option<T>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn update(&self, id: EntityId, mut record: T) -> Result<T> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !table.rows.contains_key(&id) {
            return Err(anyhow!("{} {} not found", T::KIND, id));
        }
        record.assign_id(id);
        table.check_unique(&record, Some(id))?;
        table.rows.insert(id, record.clone());

        Ok(record)
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        table.rows.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.len())
    }
}
