//! Configuration loading and management

use crate::core::auth::{AuthPolicy, DEFAULT_SESSION_COOKIE};
use crate::core::error::ConfigError;
use crate::core::kind::EntityKind;
use crate::core::query::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind (e.g., "127.0.0.1:8000")
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Items per list page
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Longest accepted session lifetime: ten years
pub const MAX_SESSION_TTL_MINUTES: i64 = 10 * 366 * 24 * 60;

/// Login and session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where anonymous requests are redirected
    pub login_url: String,

    /// Name of the session cookie
    pub session_cookie: String,

    /// Session lifetime
    pub session_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: "/accounts/login/".to_string(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            session_ttl_minutes: 24 * 60,
        }
    }
}

/// Operation on an entity kind that carries its own auth policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Detail,
}

/// Auth policies for one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityAuthConfig {
    pub kind: EntityKind,

    /// Policy for the list page
    #[serde(default = "default_policy")]
    pub list: String,

    /// Policy for the detail page
    #[serde(default = "default_policy")]
    pub detail: String,
}

fn default_policy() -> String {
    "authenticated".to_string()
}

impl EntityAuthConfig {
    /// Get the policy for an operation
    pub fn policy(&self, operation: Operation) -> AuthPolicy {
        match operation {
            Operation::List => AuthPolicy::parse_policy(&self.list),
            Operation::Detail => AuthPolicy::parse_policy(&self.detail),
        }
    }
}

/// Complete configuration for the taxi service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxiConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub auth: AuthConfig,

    /// Per-kind auth policies; kinds without an entry require login
    pub entities: Vec<EntityAuthConfig>,
}

impl TaxiConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would break request handling
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.pagination.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_string(),
                value: "0".to_string(),
                message: "page size must be at least 1".to_string(),
            });
        }

        if self.auth.session_cookie.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_cookie".to_string(),
                value: String::new(),
                message: "cookie name must not be empty".to_string(),
            });
        }

        if !self.auth.login_url.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "auth.login_url".to_string(),
                value: self.auth.login_url.clone(),
                message: "login URL must be an absolute path".to_string(),
            });
        }

        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.auth.session_ttl_minutes) {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_ttl_minutes".to_string(),
                value: self.auth.session_ttl_minutes.to_string(),
                message: format!(
                    "session lifetime must be between 1 and {} minutes",
                    MAX_SESSION_TTL_MINUTES
                ),
            });
        }

        Ok(())
    }

    /// Resolve the auth policy for an operation on a kind
    pub fn policy_for(&self, kind: EntityKind, operation: Operation) -> AuthPolicy {
        self.entities
            .iter()
            .find(|entity| entity.kind == kind)
            .map(|entity| entity.policy(operation))
            .unwrap_or(AuthPolicy::Authenticated)
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            entities: EntityKind::ALL
                .into_iter()
                .map(|kind| EntityAuthConfig {
                    kind,
                    list: default_policy(),
                    detail: default_policy(),
                })
                .collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TaxiConfig::default_config();

        assert_eq!(config.entities.len(), 3);
        assert_eq!(config.pagination.page_size, 5);
        assert_eq!(config.auth.session_cookie, "sessionid");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = TaxiConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        // Should be able to parse it back
        let parsed = TaxiConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.entities.len(), config.entities.len());
        assert_eq!(parsed.auth.login_url, config.auth.login_url);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = TaxiConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.pagination.page_size, 5);
        assert!(config.entities.is_empty());
    }

    #[test]
    fn test_policy_for() {
        let config = TaxiConfig::from_yaml_str(
            r#"
entities:
  - kind: manufacturer
    list: public
"#,
        )
        .unwrap();

        assert_eq!(
            config.policy_for(EntityKind::Manufacturer, Operation::List),
            AuthPolicy::Public
        );
        assert_eq!(
            config.policy_for(EntityKind::Manufacturer, Operation::Detail),
            AuthPolicy::Authenticated
        );
        assert_eq!(
            config.policy_for(EntityKind::Car, Operation::List),
            AuthPolicy::Authenticated
        );
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = TaxiConfig::from_yaml_str("pagination: { page_size: 0 }").unwrap_err();
        assert!(err.to_string().contains("pagination.page_size"));
    }

    #[test]
    fn test_rejects_relative_login_url() {
        let mut config = TaxiConfig::default_config();
        config.auth.login_url = "accounts/login/".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "auth.login_url"
        ));
    }

    #[test]
    fn test_rejects_session_lifetime_out_of_range() {
        for ttl in ["0", "-5", "1000000000000"] {
            let yaml = format!("auth: {{ session_ttl_minutes: {} }}", ttl);
            let err = TaxiConfig::from_yaml_str(&yaml).unwrap_err();
            assert!(err.to_string().contains("auth.session_ttl_minutes"), "{}", ttl);
        }

        let yaml = format!("auth: {{ session_ttl_minutes: {} }}", MAX_SESSION_TTL_MINUTES);
        assert!(TaxiConfig::from_yaml_str(&yaml).is_ok());
    }

    #[test]
    fn test_rejects_empty_cookie_name() {
        let mut config = TaxiConfig::default_config();
        config.auth.session_cookie.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let err = TaxiConfig::from_yaml_str("entities: [{ kind: truck }]").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}
