//! Typed error handling for the Pokemon API
//!
//! Every failure the API can produce is an [`ApiError`]. Each category knows
//! its HTTP status and a stable error code, and the whole type renders itself
//! into the uniform failure envelope:
//!
//! ```json
//! { "success": false, "message": "Validation failed", "errors": ["..."] }
//! ```
//!
//! # Error Categories
//!
//! - [`ValidationError`]: payload shape violations (all of them, not just the first)
//! - [`RequestError`]: malformed ids, malformed JSON, unknown endpoints
//! - [`EntityError`]: operations targeting a Pokemon that does not exist
//! - [`StorageError`]: the backing store could not be read or written
//!
//! # Diagnostic detail
//!
//! Server-side failures carry the underlying cause. It is only written to the
//! response body when rendered with `expose_details = true`, which the REST
//! exposure does outside production (see [`ApiError::render`]).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the Pokemon API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Payload validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed request (path, body, route)
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Targeted entity does not exist
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Backing store failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Anything else; the message is only shown as diagnostic detail
    #[error("Internal server error")]
    Internal(String),
}

/// Failure envelope written to the response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable summary
    pub message: String,

    /// Every validation violation, when there are any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Request(e) => e.status_code(),
            ApiError::Entity(e) => e.status_code(),
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Request(e) => e.error_code(),
            ApiError::Entity(e) => e.error_code(),
            ApiError::Storage(e) => e.error_code(),
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to the failure envelope
    ///
    /// Malformed JSON always carries the parser message; server-side causes
    /// are only included when `expose_details` is set.
    pub fn to_response(&self, expose_details: bool) -> ErrorResponse {
        let errors = match self {
            ApiError::Validation(e) => Some(e.errors.clone()),
            _ => None,
        };

        let error = match self {
            ApiError::Request(RequestError::MalformedJson { message }) => Some(message.clone()),
            ApiError::Storage(e) if expose_details => Some(e.detail().to_string()),
            ApiError::Internal(message) if expose_details => Some(message.clone()),
            _ => None,
        };

        ErrorResponse {
            success: false,
            message: self.to_string(),
            errors,
            error,
        }
    }

    /// Render the error as an HTTP response
    ///
    /// The error itself is stored in the response extensions so that outer
    /// layers can re-render it (see `attach_diagnostics` in the REST exposure).
    pub fn render(self, expose_details: bool) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response(expose_details));
        let mut response = (status, body).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(code = self.error_code(), cause = ?self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), cause = ?self, "{}", self);
        }
        self.render(false)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// One or more payload-shape violations, in the order they were found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed")]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the shape of the HTTP request itself
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// Path identifier is not a positive integer
    #[error("Invalid ID. Must be a positive number")]
    InvalidId { value: String },

    /// Body could not be parsed as JSON
    #[error("Invalid JSON format")]
    MalformedJson { message: String },

    /// No route matches the method and path
    #[error("Endpoint not found")]
    EndpointNotFound { method: String, path: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            RequestError::MalformedJson { .. } => StatusCode::BAD_REQUEST,
            RequestError::EndpointNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidId { .. } => "INVALID_ID",
            RequestError::MalformedJson { .. } => "MALFORMED_JSON",
            RequestError::EndpointNotFound { .. } => "ENDPOINT_NOT_FOUND",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, Clone, Error)]
pub enum EntityError {
    #[error("Pokemon not found")]
    NotFound { id: u64 },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "POKEMON_NOT_FOUND",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a [`PokemonStore`](crate::core::store::PokemonStore)
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The collection could not be read or parsed
    #[error("Error reading Pokemon data")]
    Read { location: String, message: String },

    /// The collection could not be persisted
    #[error("Error saving Pokemon data")]
    Write { location: String, message: String },
}

impl StorageError {
    pub fn read(location: impl Into<String>, message: impl ToString) -> Self {
        StorageError::Read {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub fn write(location: impl Into<String>, message: impl ToString) -> Self {
        StorageError::Write {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Read { .. } => "STORAGE_READ_ERROR",
            StorageError::Write { .. } => "STORAGE_WRITE_ERROR",
        }
    }

    /// Underlying cause, e.g. the I/O or parser message
    pub fn detail(&self) -> &str {
        match self {
            StorageError::Read { message, .. } | StorageError::Write { message, .. } => message,
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================
