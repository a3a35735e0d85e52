//! Search predicates built from raw query parameters
//!
//! The list endpoints accept a free-text fragment per kind (`name`, `model`,
//! `username`). The fragment is used verbatim: no trimming and no other
//! normalisation. Matching is a case-insensitive substring test, and an
//! empty fragment matches every record.

use crate::core::entity::Record;
use serde::Serialize;

/// A case-insensitive "contains" predicate over one text field.
///
/// The predicate is a plain value rather than a closure so that a record
/// store can inspect it and run the match natively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    field: &'static str,
    fragment: String,
    #[serde(skip)]
    folded: String,
}

impl Predicate {
    /// Field the predicate applies to
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The fragment exactly as received
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// True when the predicate places no restriction
    pub fn is_unrestricted(&self) -> bool {
        self.fragment.is_empty()
    }

    /// Test a raw field value against the predicate
    pub fn matches_text(&self, value: &str) -> bool {
        self.is_unrestricted() || value.to_lowercase().contains(&self.folded)
    }

    /// Test a record against the predicate.
    ///
    /// A record without a text value for the field only matches the
    /// unrestricted predicate.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        if self.is_unrestricted() {
            return true;
        }

        record
            .field_value(self.field)
            .as_ref()
            .and_then(|value| value.as_string())
            .is_some_and(|value| self.matches_text(value))
    }
}

/// Build the predicate for a raw, untrusted query parameter.
///
/// An absent parameter behaves like an empty one. Any string is valid input.
pub fn build_predicate(raw_param: Option<&str>, field: &'static str) -> Predicate {
    let fragment = raw_param.unwrap_or_default().to_string();
    let folded = fragment.to_lowercase();

    Predicate {
        field,
        fragment,
        folded,
    }
}
