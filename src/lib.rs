//! # Taxi Service
//!
//! Record management for a taxi service: manufacturers, cars and drivers,
//! served as searchable, paginated list pages behind a session login.
//!
//! ## Features
//!
//! - **Search**: each list filters by one text field (`name`, `model`,
//!   `username`) with a case-insensitive substring match
//! - **Pagination**: deterministic pages in creation order; out-of-range
//!   page numbers fall back to the nearest valid page
//! - **Explicit queries**: stores receive a [`ListQuery`](core::store::ListQuery)
//!   value they can execute natively
//! - **Session auth**: every list and detail page sits behind a gate that
//!   redirects anonymous visitors to the login form
//! - **Configuration-Based**: page size, login URL, cookie and per-kind
//!   policies come from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use taxi::prelude::*;
//!
//! let stores = TaxiStores::in_memory();
//! let bmw = stores.manufacturers.create(Manufacturer::new("BMW", "Germany")).await?;
//! stores.cars.create(Car::new("330i", bmw.id)).await?;
//! stores
//!     .drivers
//!     .create(Driver::new("Mykyta", "AAA11111").with_password("test123")?)
//!     .await?;
//!
//! ServerBuilder::new()
//!     .with_config(TaxiConfig::default_config())
//!     .with_stores(stores)
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, AuthProvider, NoAuthProvider, SessionAuthProvider},
        entity::{Entity, EntityId, Record},
        error::{TaxiError, TaxiResult},
        field::FieldValue,
        filter::{Predicate, build_predicate},
        kind::EntityKind,
        listing::{ListQueryOrchestrator, ListResult},
        query::{Page, PaginatedResponse, PaginationMeta, paginate, parse_page},
        service::DataService,
        store::{ListQuery, Ordering},
    };

    // === Macros ===
    pub use crate::impl_record;

    // === Entities ===
    pub use crate::entities::{Car, Driver, Manufacturer};

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, InMemorySessionStore, TaxiStores};

    // === Config ===
    pub use crate::config::TaxiConfig;

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
