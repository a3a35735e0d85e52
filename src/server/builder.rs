//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::TaxiConfig;
use crate::core::auth::{AuthProvider, SessionAuthProvider, SessionStore};
use crate::storage::{InMemorySessionStore, TaxiStores};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the taxi service HTTP server
///
/// Every component is optional: configuration defaults to
/// [`TaxiConfig::default_config`], stores and sessions to fresh in-memory
/// ones, and authentication to the session cookie named in the config.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(TaxiConfig::from_yaml_file("config/taxi.yaml")?)
///     .with_stores(stores)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: Option<TaxiConfig>,
    stores: Option<TaxiStores>,
    sessions: Option<Arc<dyn SessionStore>>,
    auth: Option<Arc<dyn AuthProvider>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            stores: None,
            sessions: None,
            auth: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: TaxiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the record stores
    pub fn with_stores(mut self, stores: TaxiStores) -> Self {
        self.stores = Some(stores);
        self
    }

    pub fn with_session_store(mut self, sessions: impl SessionStore + 'static) -> Self {
        self.sessions = Some(Arc::new(sessions));
        self
    }

    /// Replace the session-cookie provider
    pub fn with_auth_provider(mut self, auth: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are not gated; wrap them in
    /// [`require_policy`](super::router::require_policy) if they need login.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host holding all application state
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let config = self.config.take().unwrap_or_else(TaxiConfig::default_config);
        let stores = self.stores.take().unwrap_or_default();
        let sessions: Arc<dyn SessionStore> = match self.sessions.take() {
            Some(sessions) => sessions,
            None => Arc::new(InMemorySessionStore::with_ttl_minutes(
                config.auth.session_ttl_minutes,
            )),
        };
        let auth: Arc<dyn AuthProvider> = match self.auth.take() {
            Some(auth) => auth,
            None => Arc::new(SessionAuthProvider::new(
                sessions.clone(),
                config.auth.session_cookie.clone(),
            )),
        };

        ServerHost::from_builder_components(config, stores, sessions, auth)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        let custom_routes = std::mem::take(&mut self.custom_routes);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(mut self) -> Result<()> {
        let host = Arc::new(self.build_host()?);
        let addr = host.config.server.bind.clone();
        let app = RestExposure::build_router(host, std::mem::take(&mut self.custom_routes))?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
