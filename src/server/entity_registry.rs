//! Entity registry for managing entity descriptors and building list/detail routes

use crate::core::kind::EntityKind;
use crate::entities::{Car, Driver, Manufacturer};
use crate::server::handlers::{
    AppState, car_detail, driver_detail, list_records, manufacturer_detail,
};
use crate::server::router::{Gate, require_policy};
use axum::{Router, middleware, routing::MethodRouter, routing::get};
use std::collections::BTreeMap;

/// Trait that describes how to build routes for an entity kind
pub trait EntityDescriptor: Send + Sync {
    /// The kind served by these routes
    fn kind(&self) -> EntityKind;

    /// Build the routes for this kind
    ///
    /// Should return a Router with routes like:
    /// - GET /{plural}/
    /// - GET /{plural}/{id}/
    fn build_routes(&self) -> Router;
}

/// Routes of one kind, each behind its own gate
pub struct KindDescriptor {
    kind: EntityKind,
    state: AppState,
    list_gate: Gate,
    detail_gate: Gate,
}

impl KindDescriptor {
    pub fn new(kind: EntityKind, state: AppState, list_gate: Gate, detail_gate: Gate) -> Self {
        Self {
            kind,
            state,
            list_gate,
            detail_gate,
        }
    }

    fn list_handler(&self) -> MethodRouter<AppState> {
        match self.kind {
            EntityKind::Manufacturer => get(list_records::<Manufacturer>),
            EntityKind::Car => get(list_records::<Car>),
            EntityKind::Driver => get(list_records::<Driver>),
        }
    }

    fn detail_handler(&self) -> MethodRouter<AppState> {
        match self.kind {
            EntityKind::Manufacturer => get(manufacturer_detail),
            EntityKind::Car => get(car_detail),
            EntityKind::Driver => get(driver_detail),
        }
    }
}

impl EntityDescriptor for KindDescriptor {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn build_routes(&self) -> Router {
        let plural = self.kind.plural();
        let list = self.list_handler().route_layer(middleware::from_fn_with_state(
            self.list_gate.clone(),
            require_policy,
        ));
        let detail = self.detail_handler().route_layer(middleware::from_fn_with_state(
            self.detail_gate.clone(),
            require_policy,
        ));

        Router::new()
            .route(&format!("/{}/", plural), list)
            .route(&format!("/{}/{{id}}/", plural), detail)
            .with_state(self.state.clone())
    }
}

/// Registry for all entity kinds served by the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<EntityKind, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register an entity descriptor, replacing any previous one for its kind
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        self.descriptors.insert(descriptor.kind(), descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes());
        }

        router
    }

    /// Get all registered kinds
    pub fn kinds(&self) -> Vec<EntityKind> {
        self.descriptors.keys().copied().collect()
    }
}
