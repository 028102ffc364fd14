//! Typed error handling for the invoice store
//!
//! Every failure the store, the patch engine or the HTTP layer can produce
//! is a variant of [`InvoiceError`]. Each variant maps to an HTTP status code
//! and a stable error code so that clients can match on it.
//!
//! # Error Categories
//!
//! - `NotFound`: no record matches a lookup key
//! - `InvalidPath` / `PathConflict`: the dotted path cannot be applied
//! - `Storage`: the backend failed, fatal to the current operation only
//! - `Deserialization`: a stored body cannot be parsed back into a document
//! - `MissingData` / `InvalidDocument`: malformed request payloads
//!
//! # Example
//!
//! ```rust,ignore
//! match service.patch("FV/1", "dates.due_date", json!("2024-02-01")).await {
//!     Ok(outcome) => println!("updated {}", outcome.field),
//!     Err(InvoiceError::NotFound { key }) => println!("no invoice {}", key),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type of the crate
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    /// No record matches the lookup key (invoice number or record id)
    #[error("not found")]
    NotFound { key: String },

    /// The dotted path is empty or contains an empty segment
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Strict patch mode refused to overwrite a non-mapping intermediate
    #[error("path '{path}' crosses non-object value at '{segment}'")]
    PathConflict { path: String, segment: String },

    /// Underlying persistence failure
    #[error("storage error during {operation}: {message}")]
    Storage { operation: String, message: String },

    /// A stored document body cannot be parsed back into a document
    #[error("record {id} holds an unreadable document: {message}")]
    Deserialization { id: String, message: String },

    /// Patch request without `invoice_number` or `field`
    #[error("missing data")]
    MissingData,

    /// Request body is not a JSON object
    #[error("invoice must be a JSON object")]
    InvalidDocument,
}

/// Error response body for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: &'static str,
}

impl InvoiceError {
    pub fn not_found(key: impl Into<String>) -> Self {
        InvoiceError::NotFound { key: key.into() }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        InvoiceError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a backend failure, naming the operation that failed
    pub fn storage(operation: &str, err: impl std::fmt::Display) -> Self {
        InvoiceError::Storage {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InvoiceError::InvalidPath { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            InvoiceError::PathConflict { .. } => StatusCode::CONFLICT,
            InvoiceError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            InvoiceError::Deserialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            InvoiceError::MissingData => StatusCode::BAD_REQUEST,
            InvoiceError::InvalidDocument => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoiceError::NotFound { .. } => "INVOICE_NOT_FOUND",
            InvoiceError::InvalidPath { .. } => "INVALID_PATH",
            InvoiceError::PathConflict { .. } => "PATH_CONFLICT",
            InvoiceError::Storage { .. } => "STORAGE_ERROR",
            InvoiceError::Deserialization { .. } => "DESERIALIZATION_ERROR",
            InvoiceError::MissingData => "MISSING_DATA",
            InvoiceError::InvalidDocument => "INVALID_DOCUMENT",
        }
    }

    /// Convert to an error response
    ///
    /// Storage and deserialization details stay in the logs; clients get a
    /// generic message.
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            InvoiceError::Storage { .. } | InvoiceError::Deserialization { .. } => {
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        ErrorResponse {
            error,
            code: self.error_code(),
        }
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
