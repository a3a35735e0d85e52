//! List query orchestration
//!
//! Composes the filter predicate, the record-store read and pagination into
//! the single operation every list endpoint runs.

use crate::core::entity::Record;
use crate::core::error::TaxiResult;
use crate::core::kind::EntityKind;
use crate::core::query::{DEFAULT_PAGE_SIZE, Page, PaginatedResponse, paginate, parse_page};
use crate::core::service::DataService;
use crate::core::store::ListQuery;
use serde::Serialize;

/// Outcome of one list request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResult<T> {
    pub kind: EntityKind,
    pub page: Page<T>,
    /// The filter fragment exactly as received; empty when absent
    pub search: String,
}

impl<T> ListResult<T> {
    pub fn into_response(self) -> PaginatedResponse<T> {
        let pagination = self.page.meta();
        PaginatedResponse {
            data: self.page.items,
            pagination,
            search: self.search,
        }
    }
}

/// Runs filtered, paginated reads against a record store
#[derive(Debug, Clone, Copy)]
pub struct ListQueryOrchestrator {
    page_size: usize,
}

impl Default for ListQueryOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQueryOrchestrator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// List one page of `T` records matching the raw filter.
    ///
    /// The store is read once. Bad page values never fail; store errors do.
    pub async fn list<T: Record>(
        &self,
        service: &dyn DataService<T>,
        raw_filter: Option<&str>,
        raw_page: Option<&str>,
    ) -> TaxiResult<ListResult<T>> {
        let query = ListQuery::new(T::KIND, raw_filter);
        let requested_page = parse_page(raw_page);

        let matches = service.query(&query).await?;
        let match_count = matches.len();
        let page = paginate(matches, requested_page, self.page_size);

        tracing::debug!(
            kind = %T::KIND,
            search = query.predicate.fragment(),
            requested_page = ?requested_page,
            served_page = page.number,
            match_count,
            "list query"
        );

        Ok(ListResult {
            kind: T::KIND,
            page,
            search: query.predicate.fragment().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityId;
    use crate::core::error::{StorageError, TaxiError};
    use crate::entities::Manufacturer;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FixedStore(Vec<Manufacturer>);

    #[async_trait]
    impl DataService<Manufacturer> for FixedStore {
        async fn create(&self, record: Manufacturer) -> Result<Manufacturer> {
            Ok(record)
        }

        async fn get(&self, id: EntityId) -> Result<Option<Manufacturer>> {
            Ok(self.0.iter().find(|m| m.id == id).cloned())
        }

        async fn list(&self) -> Result<Vec<Manufacturer>> {
            Ok(self.0.clone())
        }

        async fn update(&self, _id: EntityId, record: Manufacturer) -> Result<Manufacturer> {
            Ok(record)
        }

        async fn delete(&self, _id: EntityId) -> Result<()> {
            Ok(())
        }
    }

    struct DownStore;

    #[async_trait]
    impl DataService<Manufacturer> for DownStore {
        async fn create(&self, _record: Manufacturer) -> Result<Manufacturer> {
            Err(StorageError::Unavailable { backend: "down".into() }.into())
        }

        async fn get(&self, _id: EntityId) -> Result<Option<Manufacturer>> {
            Err(StorageError::Unavailable { backend: "down".into() }.into())
        }

        async fn list(&self) -> Result<Vec<Manufacturer>> {
            Err(StorageError::Unavailable { backend: "down".into() }.into())
        }

        async fn update(&self, _id: EntityId, _record: Manufacturer) -> Result<Manufacturer> {
            Err(StorageError::Unavailable { backend: "down".into() }.into())
        }

        async fn delete(&self, _id: EntityId) -> Result<()> {
            Err(StorageError::Unavailable { backend: "down".into() }.into())
        }
    }

    fn store(names: &[&str]) -> FixedStore {
        FixedStore(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let mut m = Manufacturer::new(name, "");
                    m.id = i as EntityId + 1;
                    m
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_list_filters_and_echoes_search() {
        let store = store(&["Volkswagen", "Renault", "BMW"]);
        let result = ListQueryOrchestrator::default()
            .list(&store, Some("a"), None)
            .await
            .unwrap();

        assert_eq!(result.kind, EntityKind::Manufacturer);
        assert_eq!(result.search, "a");
        let names: Vec<&str> = result.page.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Volkswagen", "Renault"]);
    }

    #[tokio::test]
    async fn test_absent_filter_echoes_empty_search() {
        let store = store(&["BMW"]);
        let result = ListQueryOrchestrator::default()
            .list(&store, None, Some("junk"))
            .await
            .unwrap();
        assert_eq!(result.search, "");
        assert_eq!(result.page.number, 1);
        assert_eq!(result.page.total, 1);
    }

    #[tokio::test]
    async fn test_page_size_applies() {
        let names: Vec<String> = (0..7).map(|i| format!("M{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = store(&refs);
        let result = ListQueryOrchestrator::new(3)
            .list(&store, None, Some("3"))
            .await
            .unwrap();
        assert_eq!(result.page.items.len(), 1);
        assert_eq!(result.page.total_pages, 3);
        assert!(!result.page.has_next);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let err = ListQueryOrchestrator::default()
            .list(&DownStore, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TaxiError::Storage(StorageError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_into_response() {
        let store = store(&["Volkswagen", "Renault", "BMW"]);
        let response = ListQueryOrchestrator::new(2)
            .list(&store, Some(""), Some("2"))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.pagination.page, 2);
        assert_eq!(response.pagination.total, 3);
        assert!(response.pagination.has_prev);
        assert_eq!(response.search, "");
    }
}
