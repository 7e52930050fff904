//! Error types for vidgrab-dl
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Lifecycle, Database, Resolve, etc.)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::{DownloadId, Status};

/// Result type alias for vidgrab-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vidgrab-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Download lifecycle error
    #[error("lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Media resolution failed during processing
    #[error("resolve error: {0}")]
    Resolve(String),

    /// Caller identity required but absent
    #[error("not authenticated")]
    Unauthorized,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Record not found
    #[error("record not found: {0}")]
    NotFound(String),
}

/// Download lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Download not found in the database
    #[error("download {id} not found")]
    NotFound {
        /// The download ID that was not found
        id: DownloadId,
    },

    /// Requested status change violates the monotonic state machine
    #[error("download {id} cannot transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// The download ID the transition was attempted on
        id: DownloadId,
        /// Current status of the record
        from: Status,
        /// Requested status
        to: Status,
    },
}

/// API error response format
///
/// Returned by non-legacy API endpoints when an error occurs: a
/// machine-readable code, a human-readable message, and optional context.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "download_not_found",
///     "message": "download 123 not found",
///     "details": { "download_id": 123 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "download_not_found", "unauthorized")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Error::Unauthorized => 401,

            // 404 Not Found
            Error::Lifecycle(LifecycleError::NotFound { .. }) => 404,

            // 409 Conflict - Illegal state transition
            Error::Lifecycle(LifecycleError::InvalidTransition { .. }) => 409,

            // 500 Internal Server Error - Server-side issues
            Error::Database(_) => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,

            // 502 Bad Gateway - Resolver failures are upstream failures
            Error::Resolve(_) => 502,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Database(_) => "database_error",
            Error::Lifecycle(e) => match e {
                LifecycleError::NotFound { .. } => "download_not_found",
                LifecycleError::InvalidTransition { .. } => "invalid_transition",
            },
            Error::Resolve(_) => "resolve_error",
            Error::Unauthorized => "unauthorized",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::Lifecycle(LifecycleError::NotFound { id }) => Some(serde_json::json!({
                "download_id": id,
            })),
            Error::Lifecycle(LifecycleError::InvalidTransition { id, from, to }) => {
                Some(serde_json::json!({
                    "download_id": id,
                    "from": from.as_str(),
                    "to": to.as_str(),
                }))
            }
            _ => None,
        };

        Self {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
