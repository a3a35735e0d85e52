//! Entity kinds and their static presentation mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three record kinds managed by the taxi service.
///
/// Everything a list or detail endpoint needs to know about a kind (URL
/// segment, searchable field, templates, empty-result message) is a static
/// lookup on this enum, resolved once when routes are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Manufacturer,
    Car,
    Driver,
}

impl EntityKind {
    /// All kinds, in navigation order
    pub const ALL: [EntityKind; 3] = [EntityKind::Manufacturer, EntityKind::Car, EntityKind::Driver];

    /// Singular name (e.g., "car")
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "manufacturer",
            EntityKind::Car => "car",
            EntityKind::Driver => "driver",
        }
    }

    /// Plural name, used as the URL segment (e.g., "cars")
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "manufacturers",
            EntityKind::Car => "cars",
            EntityKind::Driver => "drivers",
        }
    }

    /// The text field the list filter matches against.
    ///
    /// This is also the name of the query parameter carrying the filter
    /// fragment (`/cars/?model=...`).
    pub fn search_field(self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "name",
            EntityKind::Car => "model",
            EntityKind::Driver => "username",
        }
    }

    /// Template rendering the list page
    pub fn list_template(self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "taxi/manufacturer_list.html",
            EntityKind::Car => "taxi/car_list.html",
            EntityKind::Driver => "taxi/driver_list.html",
        }
    }

    /// Template rendering the detail page
    pub fn detail_template(self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "taxi/manufacturer_detail.html",
            EntityKind::Car => "taxi/car_detail.html",
            EntityKind::Driver => "taxi/driver_detail.html",
        }
    }

    /// Name under which the page items are exposed to templates
    pub fn context_list_name(self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "manufacturer_list",
            EntityKind::Car => "car_list",
            EntityKind::Driver => "driver_list",
        }
    }

    /// Message shown when a (filtered) list has no items
    pub fn empty_message(self) -> &'static str {
        match self {
            EntityKind::Manufacturer => "There are no manufacturers in the service.",
            EntityKind::Car => "There are no cars in taxi",
            EntityKind::Driver => "There are no drivers in the service.",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_fields() {
        assert_eq!(EntityKind::Manufacturer.search_field(), "name");
        assert_eq!(EntityKind::Car.search_field(), "model");
        assert_eq!(EntityKind::Driver.search_field(), "username");
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&EntityKind::Driver).unwrap();
        assert_eq!(json, "\"driver\"");
        let kind: EntityKind = serde_json::from_str("\"manufacturer\"").unwrap();
        assert_eq!(kind, EntityKind::Manufacturer);
    }

    #[test]
    fn test_templates_follow_singular_name() {
        for kind in EntityKind::ALL {
            assert!(kind.list_template().contains(kind.singular()));
            assert!(kind.detail_template().contains(kind.singular()));
            assert_eq!(kind.context_list_name(), format!("{}_list", kind.singular()));
        }
    }
}
