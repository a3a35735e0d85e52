//! Server module for building the taxi service HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - list and detail routes for every entity kind, each behind an auth gate
//! - login and logout routes
//! - health check routes

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod handlers;
pub mod host;
pub mod render;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry, KindDescriptor};
pub use exposure::RestExposure;
pub use handlers::AppState;
pub use host::ServerHost;
pub use render::TemplateRenderer;
pub use router::{Gate, require_policy};
