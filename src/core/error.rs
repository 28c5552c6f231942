//! Typed error handling for the invoicer service
//!
//! Every fallible operation returns [`InvoiceError`] so that callers can
//! match on the failure category instead of unwrapping a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: bad input shape or values (HTTP 400)
//! - `NotFound`: unknown invoice id (HTTP 404)
//! - `AlreadyPaid`: mutation attempted on a settled invoice (HTTP 409)
//! - [`StorageError`]: repository failures (HTTP 500)
//!
//! The HTTP body for every error is [`ErrorResponse`]: the `error` field is
//! the human-readable message the browser UI displays, and `code` is a
//! stable machine-readable identifier.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for invoice operations
#[derive(Debug)]
pub enum InvoiceError {
    /// Input validation failed
    Validation(ValidationError),

    /// Invoice does not exist
    NotFound { id: Uuid },

    /// The invoice is fully paid and no longer accepts item or payment
    /// mutations
    AlreadyPaid { id: Uuid },

    /// Storage backend errors
    Storage(StorageError),
}

impl fmt::Display for InvoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceError::Validation(e) => write!(f, "{}", e),
            InvoiceError::NotFound { id } => {
                write!(f, "Invoice with id '{}' not found", id)
            }
            InvoiceError::AlreadyPaid { id } => {
                write!(f, "Invoice '{}' is already paid", id)
            }
            InvoiceError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvoiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvoiceError::Validation(e) => Some(e),
            InvoiceError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
///
/// The `error` field name is part of the wire contract with the UI: clients
/// read `body.error` and fall back to a generic message when the body cannot
/// be parsed.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InvoiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::Validation(_) => StatusCode::BAD_REQUEST,
            InvoiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InvoiceError::AlreadyPaid { .. } => StatusCode::CONFLICT,
            InvoiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoiceError::Validation(_) => "VALIDATION_ERROR",
            InvoiceError::NotFound { .. } => "INVOICE_NOT_FOUND",
            InvoiceError::AlreadyPaid { .. } => "INVOICE_ALREADY_PAID",
            InvoiceError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InvoiceError::NotFound { id } | InvoiceError::AlreadyPaid { id } => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            InvoiceError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid invoice id format
    InvalidId { value: String },
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
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidId { value } => {
                write!(f, "Invalid invoice id format: {}", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for InvoiceError {
    fn from(err: ValidationError) -> Self {
        InvoiceError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the storage backend
#[derive(Debug)]
pub enum StorageError {
    /// A lock guarding the store was poisoned by a panicking writer
    LockPoisoned { message: String },

    /// Storage operation failed
    OperationFailed { operation: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned { message } => {
                write!(f, "Store lock poisoned: {}", message)
            }
            StorageError::OperationFailed { operation, message } => {
                write!(f, "Storage {} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for InvoiceError {
    fn from(err: StorageError) -> Self {
        InvoiceError::Storage(err)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;

// =============================================================================
// Tests
// =============================================================================
