//! Entity traits defining the core abstraction for taxi records

use crate::core::field::FieldValue;
use crate::core::kind::EntityKind;
use serde::Serialize;

/// Identifier assigned by the record store.
///
/// Identifiers are strictly increasing in creation order, so they double as
/// the default ordering key for lists and pagination.
pub type EntityId = u64;

/// Base trait for all records in the system.
///
/// All records have:
/// - a kind (manufacturer, car, driver)
/// - an identifier assigned by the store at creation
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// The kind this type represents
    const KIND: EntityKind;

    /// Get the identifier of this record
    fn id(&self) -> EntityId;

    /// Set the identifier. Only the record store calls this, on creation.
    fn assign_id(&mut self, id: EntityId);
}

/// Trait for records that can be searched and listed.
///
/// Records extend the base Entity with dynamic field access, which the
/// filter predicate and the store's uniqueness checks are built on.
pub trait Record: Entity {
    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Fields whose values must be unique across all records of this kind
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }
}
