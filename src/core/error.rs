//! Typed error handling for the treaty-links service
//!
//! Every fallible operation of the store and the HTTP layer returns a
//! [`TreatyError`], so handlers can map failures to status codes without
//! inspecting strings.
//!
//! # Error Categories
//!
//! - [`EntityError`]: contract / exposure file lookups
//! - [`LinkError`]: link creation under strict integrity
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ValidationError`]: request body validation
//! - [`StorageError`]: store access failures
//! - [`RequestError`]: malformed paths and query strings
//!
//! # Example
//!
//! ```rust,ignore
//! use treaty_links::prelude::*;
//!
//! async fn load(store: &dyn LinkStore, id: EntityId) -> TreatyResult<Contract> {
//!     store
//!         .get_contract(id)
//!         .await?
//!         .ok_or_else(|| EntityError::not_found(Contract::ENTITY_TYPE, id).into())
//! }
//! ```

use crate::core::entity::EntityId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the service
#[derive(Debug)]
pub enum TreatyError {
    /// Contract / exposure file errors
    Entity(EntityError),

    /// Link errors
    Link(LinkError),

    /// Configuration errors
    Config(ConfigError),

    /// Validation errors
    Validation(ValidationError),

    /// Store errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for TreatyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreatyError::Entity(e) => write!(f, "{}", e),
            TreatyError::Link(e) => write!(f, "{}", e),
            TreatyError::Config(e) => write!(f, "{}", e),
            TreatyError::Validation(e) => write!(f, "{}", e),
            TreatyError::Storage(e) => write!(f, "{}", e),
            TreatyError::Request(e) => write!(f, "{}", e),
            TreatyError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for TreatyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreatyError::Entity(e) => Some(e),
            TreatyError::Link(e) => Some(e),
            TreatyError::Config(e) => Some(e),
            TreatyError::Validation(e) => Some(e),
            TreatyError::Storage(e) => Some(e),
            TreatyError::Request(e) => Some(e),
            TreatyError::Internal(_) => None,
        }
    }
}

/// Error response body
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

impl TreatyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TreatyError::Entity(e) => e.status_code(),
            TreatyError::Link(e) => e.status_code(),
            TreatyError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TreatyError::Validation(_) => StatusCode::BAD_REQUEST,
            TreatyError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TreatyError::Request(e) => e.status_code(),
            TreatyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TreatyError::Entity(e) => e.error_code(),
            TreatyError::Link(e) => e.error_code(),
            TreatyError::Config(_) => "CONFIG_ERROR",
            TreatyError::Validation(_) => "VALIDATION_ERROR",
            TreatyError::Storage(_) => "STORAGE_ERROR",
            TreatyError::Request(e) => e.error_code(),
            TreatyError::Internal(_) => "INTERNAL_ERROR",
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
            TreatyError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entityType": entity_type,
                    "id": id
                }))
            }
            TreatyError::Link(LinkError::AlreadyExists {
                contract_id,
                exposure_file_id,
            }) => Some(serde_json::json!({
                "contractId": contract_id,
                "exposureFileId": exposure_file_id
            })),
            TreatyError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for TreatyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::warn!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to contracts and exposure files
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound {
        entity_type: &'static str,
        id: EntityId,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &'static str, id: EntityId) -> Self {
        EntityError::NotFound { entity_type, id }
    }

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

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for TreatyError {
    fn from(err: EntityError) -> Self {
        TreatyError::Entity(err)
    }
}

// =============================================================================
// Link Errors
// =============================================================================

/// Errors related to link operations
#[derive(Debug)]
pub enum LinkError {
    /// The pair is already linked (strict integrity only)
    AlreadyExists {
        contract_id: EntityId,
        exposure_file_id: EntityId,
    },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::AlreadyExists {
                contract_id,
                exposure_file_id,
            } => {
                write!(
                    f,
                    "Contract '{}' is already linked to exposure file '{}'",
                    contract_id, exposure_file_id
                )
            }
        }
    }
}

impl std::error::Error for LinkError {}

impl LinkError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LinkError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LinkError::AlreadyExists { .. } => "LINK_ALREADY_EXISTS",
        }
    }
}

impl From<LinkError> for TreatyError {
    fn from(err: LinkError) -> Self {
        TreatyError::Link(err)
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

    /// Configuration file not found
    FileNotFound { path: String },

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
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for TreatyError {
    fn from(err: ConfigError) -> Self {
        TreatyError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not valid JSON or does not match the expected shape
    InvalidJson { message: String },

    /// Missing required argument
    MissingArgument { argument: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            ValidationError::MissingArgument { argument } => {
                write!(f, "Missing required argument: {}", argument)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for TreatyError {
    fn from(err: ValidationError) -> Self {
        TreatyError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for TreatyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        TreatyError::Validation(errors.into())
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the backing store
#[derive(Debug)]
pub enum StorageError {
    /// A writer panicked while holding the store lock
    LockPoisoned { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned { message } => {
                write!(f, "Failed to acquire store lock: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for TreatyError {
    fn from(err: StorageError) -> Self {
        TreatyError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Path segment is not a valid entity id
    InvalidEntityId { value: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidEntityId { value } => {
                write!(f, "Invalid entity ID format: '{}'", value)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
        }
    }
}

impl From<RequestError> for TreatyError {
    fn from(err: RequestError) -> Self {
        TreatyError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for TreatyError {
    fn from(err: serde_json::Error) -> Self {
        TreatyError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for TreatyError {
    fn from(err: std::io::Error) -> Self {
        TreatyError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for TreatyError {
    fn from(err: serde_yaml::Error) -> Self {
        TreatyError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for treaty-links operations
pub type TreatyResult<T> = Result<T, TreatyError>;
