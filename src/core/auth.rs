//! Authorization system for the taxi service
//!
//! Provides context-based authorization:
//! - Session-cookie authentication of drivers
//! - Per-operation policies resolved from configuration

use crate::core::entity::EntityId;
use anyhow::Result;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Default name of the session cookie
pub const DEFAULT_SESSION_COOKIE: &str = "sessionid";

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Logged-in driver
    User { user_id: EntityId, username: String },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<EntityId> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthContext::User { username, .. } => Some(username),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, AuthContext::Anonymous)
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => context.is_authenticated(),
        }
    }

    /// Parse policy from string (for YAML config)
    pub fn parse_policy(s: &str) -> Self {
        match s {
            "public" => AuthPolicy::Public,
            _ => AuthPolicy::Authenticated, // Default
        }
    }
}

/// A logged-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: EntityId,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Storage for login sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session for a user and return it
    async fn create(&self, user_id: EntityId, username: &str) -> Result<Session>;

    /// Resolve a token; expired sessions resolve to `None`
    async fn get(&self, token: &str) -> Result<Option<Session>>;

    /// Drop a session
    async fn remove(&self, token: &str) -> Result<()>;
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from the request headers
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext>;
}

/// Default no-auth provider (for development)
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn extract_context(&self, _headers: &HeaderMap) -> Result<AuthContext> {
        Ok(AuthContext::Anonymous)
    }
}

/// Resolves the session cookie through a [`SessionStore`]
pub struct SessionAuthProvider {
    sessions: Arc<dyn SessionStore>,
    cookie_name: String,
}

impl SessionAuthProvider {
    pub fn new(sessions: Arc<dyn SessionStore>, cookie_name: impl Into<String>) -> Self {
        Self {
            sessions,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

#[async_trait]
impl AuthProvider for SessionAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext> {
        let Some(token) = cookie_value(headers, &self.cookie_name) else {
            return Ok(AuthContext::Anonymous);
        };

        Ok(match self.sessions.get(&token).await? {
            Some(session) => AuthContext::User {
                user_id: session.user_id,
                username: session.username,
            },
            None => AuthContext::Anonymous,
        })
    }
}

/// Read a cookie from the `Cookie` request headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn user() -> AuthContext {
        AuthContext::User {
            user_id: 1,
            username: "Mykyta".to_string(),
        }
    }

    struct FixedSessions {
        sessions: Mutex<HashMap<String, Session>>,
    }

    #[async_trait]
    impl SessionStore for FixedSessions {
        async fn create(&self, user_id: EntityId, username: &str) -> Result<Session> {
            let session = Session {
                token: format!("token-{}", user_id),
                user_id,
                username: username.to_string(),
                expires_at: Utc::now() + chrono::Duration::hours(1),
            };
            self.sessions
                .lock()
                .unwrap()
                .insert(session.token.clone(), session.clone());
            Ok(session)
        }

        async fn get(&self, token: &str) -> Result<Option<Session>> {
            Ok(self.sessions.lock().unwrap().get(token).cloned())
        }

        async fn remove(&self, token: &str) -> Result<()> {
            self.sessions.lock().unwrap().remove(token);
            Ok(())
        }
    }

    #[test]
    fn test_policy_check() {
        assert!(AuthPolicy::Authenticated.check(&user()));
        assert!(AuthPolicy::Public.check(&user()));

        let anon_context = AuthContext::Anonymous;
        assert!(AuthPolicy::Public.check(&anon_context));
        assert!(!AuthPolicy::Authenticated.check(&anon_context));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(AuthPolicy::parse_policy("public"), AuthPolicy::Public);
        assert_eq!(
            AuthPolicy::parse_policy("authenticated"),
            AuthPolicy::Authenticated
        );
    }

    #[test]
    fn test_parse_policy_unknown_defaults_to_authenticated() {
        assert_eq!(
            AuthPolicy::parse_policy("something_unknown"),
            AuthPolicy::Authenticated
        );
    }

    // --- AuthContext accessors ---

    #[test]
    fn test_context_accessors() {
        assert_eq!(user().user_id(), Some(1));
        assert_eq!(user().username(), Some("Mykyta"));
        assert_eq!(AuthContext::Anonymous.user_id(), None);
        assert!(!AuthContext::Anonymous.is_authenticated());
    }

    // --- cookies ---

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("csrftoken=abc; sessionid=xyz"),
        );
        assert_eq!(cookie_value(&headers, "sessionid"), Some("xyz".to_string()));
        assert_eq!(cookie_value(&headers, "csrftoken"), Some("abc".to_string()));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            token: "t".to_string(),
            user_id: 1,
            username: "u".to_string(),
            expires_at: Utc::now(),
        };
        assert!(session.is_expired(Utc::now() + chrono::Duration::seconds(1)));
        assert!(!session.is_expired(Utc::now() - chrono::Duration::minutes(1)));
    }

    // --- providers ---

    #[tokio::test]
    async fn test_no_auth_provider_is_anonymous() {
        let context = NoAuthProvider
            .extract_context(&HeaderMap::new())
            .await
            .unwrap();
        assert_eq!(context, AuthContext::Anonymous);
    }

    #[tokio::test]
    async fn test_session_provider_resolves_cookie() {
        let sessions = Arc::new(FixedSessions {
            sessions: Mutex::new(HashMap::new()),
        });
        let session = sessions.create(7, "Bolt").await.unwrap();
        let provider = SessionAuthProvider::new(sessions, DEFAULT_SESSION_COOKIE);

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("sessionid={}", session.token)).unwrap(),
        );
        let context = provider.extract_context(&headers).await.unwrap();
        assert_eq!(context.user_id(), Some(7));

        let mut stale = HeaderMap::new();
        stale.insert(COOKIE, HeaderValue::from_static("sessionid=unknown"));
        let context = provider.extract_context(&stale).await.unwrap();
        assert_eq!(context, AuthContext::Anonymous);

        let context = provider.extract_context(&HeaderMap::new()).await.unwrap();
        assert_eq!(context, AuthContext::Anonymous);
    }
}
