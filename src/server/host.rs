//! Server host holding all application state
//!
//! The host is assembled once by the builder and is the single source of
//! truth for what the REST exposure serves: configuration, stores, sessions,
//! the auth provider and the per-kind route descriptors.

use crate::config::{Operation, TaxiConfig};
use crate::core::auth::{AuthPolicy, AuthProvider, SessionStore};
use crate::core::kind::EntityKind;
use crate::core::listing::ListQueryOrchestrator;
use crate::server::entity_registry::{EntityRegistry, KindDescriptor};
use crate::server::handlers::AppState;
use crate::server::render::TemplateRenderer;
use crate::server::router::Gate;
use crate::storage::TaxiStores;
use anyhow::Result;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::from_builder_components(config, stores, sessions, auth)?;
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<TaxiConfig>,

    /// State handed to every page handler
    pub state: AppState,

    /// Resolves the caller of each gated request
    pub auth: Arc<dyn AuthProvider>,

    /// Entity registry for list/detail routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// Fails when the configuration is invalid or a template does not parse.
    pub fn from_builder_components(
        config: TaxiConfig,
        stores: TaxiStores,
        sessions: Arc<dyn SessionStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let state = AppState {
            stores,
            sessions,
            renderer: Arc::new(TemplateRenderer::new()?),
            orchestrator: ListQueryOrchestrator::new(config.pagination.page_size),
            config: config.clone(),
        };

        let mut entity_registry = EntityRegistry::new();
        for kind in EntityKind::ALL {
            entity_registry.register(Box::new(KindDescriptor::new(
                kind,
                state.clone(),
                Self::gate(&auth, &config, config.policy_for(kind, Operation::List)),
                Self::gate(&auth, &config, config.policy_for(kind, Operation::Detail)),
            )));
        }

        Ok(Self {
            config,
            state,
            auth,
            entity_registry,
        })
    }

    fn gate(auth: &Arc<dyn AuthProvider>, config: &TaxiConfig, policy: AuthPolicy) -> Gate {
        Gate::new(auth.clone(), policy, &config.auth.login_url)
    }

    /// Gate for pages that always require login
    pub fn login_gate(&self) -> Gate {
        Self::gate(&self.auth, &self.config, AuthPolicy::Authenticated)
    }

    /// Get the kinds registered in the host
    pub fn kinds(&self) -> Vec<EntityKind> {
        self.entity_registry.kinds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::NoAuthProvider;
    use crate::storage::InMemorySessionStore;

    fn make_host(config: TaxiConfig) -> Result<ServerHost> {
        ServerHost::from_builder_components(
            config,
            TaxiStores::in_memory(),
            Arc::new(InMemorySessionStore::default()),
            Arc::new(NoAuthProvider),
        )
    }

    #[test]
    fn test_from_builder_components_registers_all_kinds() {
        let host = make_host(TaxiConfig::default_config()).unwrap();
        assert_eq!(host.kinds(), EntityKind::ALL.to_vec());
    }

    #[test]
    fn test_page_size_from_config() {
        let mut config = TaxiConfig::default_config();
        config.pagination.page_size = 20;
        let host = make_host(config).unwrap();
        assert_eq!(host.state.orchestrator.page_size(), 20);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = TaxiConfig::default_config();
        config.pagination.page_size = 0;
        assert!(make_host(config).is_err());
    }

    #[test]
    fn test_login_gate_requires_authentication() {
        let host = make_host(TaxiConfig::default_config()).unwrap();
        assert_eq!(host.login_gate().policy(), AuthPolicy::Authenticated);
    }
}
