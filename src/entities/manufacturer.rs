use crate::core::kind::EntityKind;
use crate::impl_record;
use std::fmt;

impl_record!(
    Manufacturer,
    EntityKind::Manufacturer,
    fields: [name, country],
    unique: [],
    {
        name: String,
        #[serde(default)]
        country: String,
    }
);

impl Manufacturer {
    /// Create an unsaved manufacturer; the store assigns the id
    pub fn new(name: &str, country: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            country: country.to_string(),
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}
