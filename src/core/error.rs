//! Typed error handling for the taxi service
//!
//! This module provides the error hierarchy used at the HTTP boundary so
//! that handlers can map failures to status codes without inspecting
//! `anyhow::Error` strings.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a record lookup failed
//! - [`ConfigError`]: configuration parsing and validation
//! - [`StorageError`]: the record or session store failed
//! - [`RequestError`]: malformed or unauthorised requests
//! - [`RenderError`]: template rendering failed
//!
//! # Example
//!
//! ```rust,ignore
//! use taxi::prelude::*;
//!
//! async fn get_car(id: EntityId) -> TaxiResult<Car> {
//!     cars.get(id).await?.ok_or(TaxiError::Entity(EntityError::NotFound {
//!         kind: EntityKind::Car,
//!         id,
//!     }))
//! }
//! ```

use crate::core::entity::EntityId;
use crate::core::kind::EntityKind;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the taxi service
#[derive(Debug)]
pub enum TaxiError {
    /// Record lookup errors
    Entity(EntityError),

    /// Configuration errors
    Config(ConfigError),

    /// Storage backend errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Template rendering errors
    Render(RenderError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for TaxiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxiError::Entity(e) => write!(f, "{}", e),
            TaxiError::Config(e) => write!(f, "{}", e),
            TaxiError::Storage(e) => write!(f, "{}", e),
            TaxiError::Request(e) => write!(f, "{}", e),
            TaxiError::Render(e) => write!(f, "{}", e),
            TaxiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for TaxiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaxiError::Entity(e) => Some(e),
            TaxiError::Config(e) => Some(e),
            TaxiError::Storage(e) => Some(e),
            TaxiError::Request(e) => Some(e),
            TaxiError::Render(e) => Some(e),
            TaxiError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TaxiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaxiError::Entity(e) => e.status_code(),
            TaxiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TaxiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TaxiError::Request(e) => e.status_code(),
            TaxiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TaxiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TaxiError::Entity(e) => e.error_code(),
            TaxiError::Config(_) => "CONFIG_ERROR",
            TaxiError::Storage(e) => e.error_code(),
            TaxiError::Request(e) => e.error_code(),
            TaxiError::Render(_) => "RENDER_ERROR",
            TaxiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            TaxiError::Entity(EntityError::NotFound { kind, id }) => Some(serde_json::json!({
                "kind": kind,
                "id": id
            })),
            _ => None,
        }
    }
}

impl IntoResponse for TaxiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to record lookups
#[derive(Debug)]
pub enum EntityError {
    /// Record was not found
    NotFound { kind: EntityKind, id: EntityId },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { kind, id } => {
                write!(f, "{} with id '{}' not found", kind, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl From<EntityError> for TaxiError {
    fn from(err: EntityError) -> Self {
        TaxiError::Entity(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for TaxiError {
    fn from(err: ConfigError) -> Self {
        TaxiError::Config(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// A unique field already holds the value
    IntegrityError { message: String },

    /// Backend not available
    Unavailable { backend: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IntegrityError { message } => {
                write!(f, "Data integrity error: {}", message)
            }
            StorageError::Unavailable { backend } => {
                write!(f, "Storage backend '{}' is unavailable", backend)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::IntegrityError { .. } => "STORAGE_INTEGRITY_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

impl From<StorageError> for TaxiError {
    fn from(err: StorageError) -> Self {
        TaxiError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid entity ID format
    InvalidEntityId { id: String },

    /// Invalid request body
    InvalidBody { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidEntityId { id } => {
                write!(f, "Invalid entity ID format: '{}'", id)
            }
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

impl From<RequestError> for TaxiError {
    fn from(err: RequestError) -> Self {
        TaxiError::Request(err)
    }
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors raised while producing markup
#[derive(Debug)]
pub enum RenderError {
    /// A template failed to load or render
    Template { name: String, message: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Template { name, message } => {
                write!(f, "Failed to render template '{}': {}", name, message)
            }
        }
    }
}

impl std::error::Error for RenderError {}

impl From<RenderError> for TaxiError {
    fn from(err: RenderError) -> Self {
        TaxiError::Render(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for TaxiError {
    fn from(err: std::io::Error) -> Self {
        TaxiError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for TaxiError {
    fn from(err: serde_yaml::Error) -> Self {
        TaxiError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error, recovering typed storage errors.
///
/// Stores report failures through `anyhow`; a `StorageError` inside keeps
/// its category so the response still says what went wrong.
impl From<anyhow::Error> for TaxiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => TaxiError::Storage(storage),
            Err(err) => match err.downcast::<ConfigError>() {
                Ok(config) => TaxiError::Config(config),
                Err(err) => match err.downcast::<TaxiError>() {
                    Ok(taxi) => taxi,
                    Err(err) => TaxiError::Internal(format!("{:#}", err)),
                },
            },
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for taxi service operations
pub type TaxiResult<T> = Result<T, TaxiError>;
