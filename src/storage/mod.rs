//! Storage implementations

pub mod in_memory;
pub mod session;
pub mod stores;

pub use in_memory::InMemoryDataService;
pub use session::InMemorySessionStore;
pub use stores::TaxiStores;
