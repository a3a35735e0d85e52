//! Router builder utilities: the auth gate and the non-entity routes

use crate::core::auth::{AuthPolicy, AuthProvider};
use crate::core::error::TaxiError;
use crate::server::handlers::{AppState, found, index, login, login_form, logout};
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;

/// Precondition applied to a route before its handler runs
#[derive(Clone)]
pub struct Gate {
    auth: Arc<dyn AuthProvider>,
    policy: AuthPolicy,
    login_url: Arc<str>,
}

impl Gate {
    pub fn new(auth: Arc<dyn AuthProvider>, policy: AuthPolicy, login_url: &str) -> Self {
        Self {
            auth,
            policy,
            login_url: Arc::from(login_url),
        }
    }

    pub fn policy(&self) -> AuthPolicy {
        self.policy
    }

    /// Where a rejected request for `path` is sent
    pub fn login_redirect(&self, path: &str) -> String {
        format!("{}?next={}", self.login_url, urlencoding::encode(path))
    }
}

/// Gate middleware
///
/// Resolves the caller's [`AuthContext`](crate::core::auth::AuthContext)
/// and either hands it to the handler as a request extension or redirects
/// to the login page. A rejected request never reaches the handler, so no
/// store is queried on its behalf.
pub async fn require_policy(State(gate): State<Gate>, mut request: Request, next: Next) -> Response {
    let context = match gate.auth.extract_context(request.headers()).await {
        Ok(context) => context,
        Err(e) => return TaxiError::from(e).into_response(),
    };

    if !gate.policy.check(&context) {
        let path = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        tracing::debug!(path, "anonymous request redirected to login");
        return found(&gate.login_redirect(path));
    }

    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Build the index route, gated behind login
///
/// - GET / - Counts of each record kind
pub fn build_index_routes(state: AppState, gate: Gate) -> Router {
    Router::new()
        .route(
            "/",
            get(index).route_layer(middleware::from_fn_with_state(gate, require_policy)),
        )
        .with_state(state)
}

/// Build the account routes
///
/// - GET /accounts/login/ - Login form
/// - POST /accounts/login/ - Verify credentials and open a session
/// - POST /accounts/logout/ - Close the session
pub fn build_account_routes(state: AppState) -> Router {
    Router::new()
        .route("/accounts/login/", get(login_form).post(login))
        .route("/accounts/logout/", post(logout))
        .with_state(state)
}
