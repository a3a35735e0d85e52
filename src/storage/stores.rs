//! The set of record stores the service runs against

use crate::core::entity::Record;
use crate::core::service::DataService;
use crate::entities::{Car, Driver, Manufacturer};
use crate::storage::in_memory::InMemoryDataService;
use std::sync::Arc;

/// One store per entity kind
#[derive(Clone)]
pub struct TaxiStores {
    pub manufacturers: Arc<dyn DataService<Manufacturer>>,
    pub cars: Arc<dyn DataService<Car>>,
    pub drivers: Arc<dyn DataService<Driver>>,
}

impl TaxiStores {
    pub fn new(
        manufacturers: Arc<dyn DataService<Manufacturer>>,
        cars: Arc<dyn DataService<Car>>,
        drivers: Arc<dyn DataService<Driver>>,
    ) -> Self {
        Self {
            manufacturers,
            cars,
            drivers,
        }
    }

    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryDataService::<Manufacturer>::new()),
            Arc::new(InMemoryDataService::<Car>::new()),
            Arc::new(InMemoryDataService::<Driver>::new()),
        )
    }
}

impl Default for TaxiStores {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// A record type with a dedicated store in [`TaxiStores`]
pub trait StoredRecord: Record {
    /// The store holding records of this type
    fn service(stores: &TaxiStores) -> &Arc<dyn DataService<Self>>;
}

impl StoredRecord for Manufacturer {
    fn service(stores: &TaxiStores) -> &Arc<dyn DataService<Self>> {
        &stores.manufacturers
    }
}

impl StoredRecord for Car {
    fn service(stores: &TaxiStores) -> &Arc<dyn DataService<Self>> {
        &stores.cars
    }
}

impl StoredRecord for Driver {
    fn service(stores: &TaxiStores) -> &Arc<dyn DataService<Self>> {
        &stores.drivers
    }
}
