//! Unified error handling.
//!
//! Provides a single error type that handlers return and that converts to an
//! Axum HTTP response wrapped in the standard envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::response::ApiResponse;

/// Client-facing message for any storage or internal failure
const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong!";

/// Detail text shown instead of the raw error outside development
const REDACTED_DETAIL: &str = "Internal server error";

static EXPOSE_ERROR_DETAILS: OnceCell<bool> = OnceCell::new();

/// Decide, once per process, whether raw error text reaches clients.
///
/// Later calls are ignored.
pub fn expose_error_details(enabled: bool) {
    if EXPOSE_ERROR_DETAILS.set(enabled).is_err() {
        tracing::debug!("Error detail exposure already configured");
    }
}

/// Whether raw error text is included in failure responses (default: no)
pub fn error_details_exposed() -> bool {
    EXPOSE_ERROR_DETAILS.get().copied().unwrap_or(false)
}

/// Failure reported by the underlying store, carrying the driver's message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Original message from the store
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for StorageError {
    fn from(err: sea_orm::DbErr) -> Self {
        StorageError::new(err.to_string())
    }
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response envelope, optionally including raw error text.
    pub fn envelope(&self, expose_details: bool) -> ApiResponse<()> {
        match self {
            // Client errors carry their own message
            AppError::NotFound(_) | AppError::Conflict(_) | AppError::Validation(_) => {
                ApiResponse::failure(self.to_string())
            }

            // Hide details for unexpected failures unless asked not to
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                Self::generic_failure(e.message(), expose_details)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Self::generic_failure(msg, expose_details)
            }
        }
    }

    fn generic_failure(detail: &str, expose_details: bool) -> ApiResponse<()> {
        let detail = if expose_details {
            detail
        } else {
            REDACTED_DETAIL
        };
        ApiResponse::failure_with_error(GENERIC_FAILURE_MESSAGE, detail)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.envelope(error_details_exposed());
        (self.status(), Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Conflict(entity) => AppError::Conflict(entity),
        }
    }
}

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Storage(err.into())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
