use crate::core::entity::EntityId;
use crate::core::kind::EntityKind;
use crate::impl_record;
use std::collections::BTreeSet;
use std::fmt;

impl_record!(
    Car,
    EntityKind::Car,
    fields: [model, manufacturer_id],
    unique: [],
    {
        model: String,
        manufacturer_id: EntityId,
        #[serde(default)]
        drivers: BTreeSet<EntityId>,
    }
);

impl Car {
    pub fn new(model: &str, manufacturer_id: EntityId) -> Self {
        Self {
            id: 0,
            model: model.to_string(),
            manufacturer_id,
            drivers: BTreeSet::new(),
        }
    }

    /// Builder-style helper assigning drivers
    pub fn with_drivers(mut self, drivers: impl IntoIterator<Item = EntityId>) -> Self {
        self.drivers.extend(drivers);
        self
    }

    pub fn has_driver(&self, driver_id: EntityId) -> bool {
        self.drivers.contains(&driver_id)
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)
    }
}
