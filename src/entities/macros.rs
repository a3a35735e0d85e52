//! Macros for reducing boilerplate when defining records
//!
//! These macros generate the repetitive trait implementations needed
//! for each record type: the struct with its store-assigned `id`, the
//! `Entity` impl and the by-name field access behind filtering.

/// Complete macro to create a record type with automatic trait implementations
///
/// The `fields` list names the attributes reachable through
/// `Record::field_value`; each must convert into a `FieldValue`.
/// The `unique` list names the fields the record store keeps unique.
///
/// # Example
///
/// ```rust,ignore
/// use taxi::prelude::*;
///
/// impl_record!(
///     Manufacturer,
///     EntityKind::Manufacturer,
///     fields: [name, country],
///     unique: [],
///     {
///         name: String,
///         country: String,
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $type:ident,
        $kind:expr,
        fields: [ $( $exposed:ident ),* $(,)? ],
        unique: [ $( $unique:ident ),* $(,)? ],
        {
            $( $(#[$meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Identifier assigned by the record store
            #[serde(default)]
            pub id: $crate::core::entity::EntityId,
            $( $(#[$meta])* pub $field : $field_type ),*
        }

        impl $crate::core::entity::Entity for $type {
            const KIND: $crate::core::kind::EntityKind = $kind;

            fn id(&self) -> $crate::core::entity::EntityId {
                self.id
            }

            fn assign_id(&mut self, id: $crate::core::entity::EntityId) {
                self.id = id;
            }
        }

        impl $crate::core::entity::Record for $type {
            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                if field == "id" {
                    return Some($crate::core::field::FieldValue::from(self.id));
                }
                $(
                    if field == stringify!($exposed) {
                        return Some($crate::core::field::FieldValue::from(self.$exposed.clone()));
                    }
                )*
                None
            }

            fn unique_fields() -> &'static [&'static str] {
                &[ $( stringify!($unique) ),* ]
            }
        }
    };
}
