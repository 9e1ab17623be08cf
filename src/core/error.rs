//! Typed error handling for the dashboard API
//!
//! Resolvers and catalog operations return [`DashboardError`] so that clients
//! receive a stable `extensions.code` alongside the human-readable message.
//!
//! # Error Categories
//!
//! - [`EntityError`]: node lookup failures (invalid id, type mismatch, not found)
//! - [`AuthError`]: staff-only check, credentials and token failures
//! - [`ValidationError`]: mutation input validation
//! - [`StorageError`]: storage backend failures
//! - [`ConfigError`]: configuration parsing and validation
//! - [`RequestError`]: malformed connection arguments and other request issues
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! match catalog.get_node(&id, Some(NodeKind::Category)).await {
//!     Ok(node) => println!("Found: {:?}", node),
//!     Err(DashboardError::Entity(EntityError::TypeMismatch { expected, .. })) => {
//!         println!("expected a {} id", expected);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use async_graphql::ErrorExtensions;
use serde::Serialize;
use std::fmt;

use crate::core::jwt::JwtError;

/// The main error type of the dashboard
#[derive(Debug)]
pub enum DashboardError {
    /// Node lookup errors
    Entity(EntityError),

    /// Authentication and authorization errors
    Auth(AuthError),

    /// Input validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Request errors
    Request(RequestError),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Entity(e) => write!(f, "{}", e),
            DashboardError::Auth(e) => write!(f, "{}", e),
            DashboardError::Validation(e) => write!(f, "{}", e),
            DashboardError::Storage(e) => write!(f, "{}", e),
            DashboardError::Config(e) => write!(f, "{}", e),
            DashboardError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Entity(e) => Some(e),
            DashboardError::Auth(e) => Some(e),
            DashboardError::Validation(e) => Some(e),
            DashboardError::Storage(e) => Some(e),
            DashboardError::Config(e) => Some(e),
            DashboardError::Request(e) => Some(e),
        }
    }
}

impl DashboardError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Entity(e) => e.error_code(),
            DashboardError::Auth(e) => e.error_code(),
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Request(e) => e.error_code(),
        }
    }

    /// Structured context exposed as `extensions.details`
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Entity(EntityError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            DashboardError::Entity(EntityError::TypeMismatch { expected, found }) => {
                Some(serde_json::json!({ "expected": expected, "found": found }))
            }
            DashboardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }

    /// Shorthand for the staff-only check failure
    pub fn permission_denied() -> Self {
        DashboardError::Auth(AuthError::PermissionDenied)
    }

    /// Shorthand for a single field validation failure
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        DashboardError::Validation(ValidationError::FieldErrors(vec![FieldValidationError {
            field: field.into(),
            message: message.into(),
        }]))
    }
}

impl ErrorExtensions for DashboardError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.error_code());
            if let Some(details) = self.details() {
                if let Ok(value) = async_graphql::Value::from_json(details) {
                    e.set("details", value);
                }
            }
        })
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors produced by the generic node lookup
#[derive(Debug)]
pub enum EntityError {
    /// The global id could not be decoded
    InvalidId { id: String },

    /// The global id decodes to a different node kind than requested
    TypeMismatch { expected: String, found: String },

    /// No node exists for the global id
    NotFound { id: String },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::InvalidId { id } => write!(f, "Couldn't resolve id: {}.", id),
            EntityError::TypeMismatch { expected, .. } => {
                write!(f, "Must receive a {} id.", expected)
            }
            EntityError::NotFound { id } => write!(
                f,
                "Could not resolve to a node with the global id of '{}'.",
                id
            ),
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::InvalidId { .. } => "INVALID_ID",
            EntityError::TypeMismatch { .. } => "TYPE_MISMATCH",
            EntityError::NotFound { .. } => "NOT_FOUND",
        }
    }
}

impl From<EntityError> for DashboardError {
    fn from(err: EntityError) -> Self {
        DashboardError::Entity(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to authentication and authorization
#[derive(Debug)]
pub enum AuthError {
    /// The caller is not a staff member
    PermissionDenied,

    /// Unknown email, wrong password or inactive account
    InvalidCredentials,

    /// Token could not be verified
    Token(JwtError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::PermissionDenied => {
                write!(f, "You do not have permission to perform this action")
            }
            AuthError::InvalidCredentials => write!(f, "Please, enter valid credentials"),
            AuthError::Token(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Token(e) => Some(e),
            _ => None,
        }
    }
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::PermissionDenied => "PERMISSION_DENIED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Token(e) => e.error_code(),
        }
    }
}

impl From<AuthError> for DashboardError {
    fn from(err: AuthError) -> Self {
        DashboardError::Auth(err)
    }
}

impl From<JwtError> for DashboardError {
    fn from(err: JwtError) -> Self {
        DashboardError::Auth(AuthError::Token(err))
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to mutation input validation
#[derive(Debug)]
pub enum ValidationError {
    /// One or more field errors
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation failed: {}", messages.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        DashboardError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// A store operation failed
    OperationFailed { operation: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::OperationFailed { operation, message } => {
                write!(f, "Storage {} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for DashboardError {
    fn from(err: StorageError) -> Self {
        DashboardError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
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
            ConfigError::IoError { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        DashboardError::Config(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the shape of a request
#[derive(Debug)]
pub enum RequestError {
    /// Connection arguments are out of bounds or malformed
    InvalidPagination { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidPagination { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidPagination { .. } => "INVALID_PAGINATION",
        }
    }
}

impl From<RequestError> for DashboardError {
    fn from(err: RequestError) -> Self {
        DashboardError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        DashboardError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

/// Storage traits speak `anyhow`; anything reaching the API from there is a
/// storage failure unless it already carries a typed error.
impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DashboardError>() {
            Ok(typed) => typed,
            Err(err) => {
                tracing::error!("storage failure: {:#}", err);
                DashboardError::Storage(StorageError::OperationFailed {
                    operation: "query".to_string(),
                    message: err.to_string(),
                })
            }
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
