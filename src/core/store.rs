//! Explicit query requests handed to record stores

use crate::core::entity::{EntityId, Record};
use crate::core::filter::{Predicate, build_predicate};
use crate::core::kind::EntityKind;
use serde::Serialize;

/// Result ordering requested from a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
    /// Identifier ascending, i.e. creation order
    #[default]
    IdAscending,
}

impl Ordering {
    /// Sort a collection in place. The sort is stable.
    pub fn sort<T>(self, data: &mut [T], id: impl Fn(&T) -> EntityId) {
        match self {
            Ordering::IdAscending => data.sort_by_key(|item| id(item)),
        }
    }
}

/// A fully described read: which kind, which records, in which order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub kind: EntityKind,
    pub predicate: Predicate,
    pub ordering: Ordering,
}

impl ListQuery {
    /// Query for records of `kind` whose searchable field contains the raw
    /// filter fragment
    pub fn new(kind: EntityKind, raw_filter: Option<&str>) -> Self {
        Self {
            kind,
            predicate: build_predicate(raw_filter, kind.search_field()),
            ordering: Ordering::IdAscending,
        }
    }

    /// Apply the query to an in-memory collection.
    ///
    /// Keeps matching records and re-establishes the requested ordering.
    pub fn apply<T: Record>(&self, data: Vec<T>) -> Vec<T> {
        let mut data: Vec<T> = data
            .into_iter()
            .filter(|record| self.predicate.matches(record))
            .collect();
        self.ordering.sort(&mut data, |record| record.id());
        data
    }
}
