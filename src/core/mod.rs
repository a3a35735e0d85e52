//! Core module containing fundamental traits and types for the taxi service

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod kind;
pub mod listing;
pub mod query;
pub mod service;
pub mod store;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, NoAuthProvider, SessionAuthProvider};
pub use entity::{Entity, EntityId, Record};
pub use error::{TaxiError, TaxiResult};
pub use field::FieldValue;
pub use filter::{Predicate, build_predicate};
pub use kind::EntityKind;
pub use listing::{ListQueryOrchestrator, ListResult};
pub use query::{Page, PaginatedResponse, PaginationMeta, paginate, parse_page};
pub use service::DataService;
pub use store::{ListQuery, Ordering};
