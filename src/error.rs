//! Error types for the registration backend.
//!
//! [`RegistryError`] is the domain error taxonomy used by services and
//! stores. [`AppError`] bridges it to HTTP responses, implementing Axum's
//! `IntoResponse` with the per-endpoint JSON error shapes: registration
//! endpoints return `{"message": ...}`, payment endpoints return
//! `{"success": false, "message": ...}`. Clients depend on these exact
//! shapes, so they are preserved per endpoint rather than unified.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Domain error taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Missing or malformed request fields.
    #[error("{0}")]
    InvalidRequest(String),

    /// Unknown event ID.
    #[error("Event not found")]
    EventNotFound,

    /// Unknown registration ID.
    #[error("Registration not found")]
    RegistrationNotFound,

    /// Payment signature did not match the recomputed HMAC.
    #[error("Invalid payment signature")]
    InvalidSignature,

    /// Caller did not present an authenticated identity.
    #[error("{0}")]
    Unauthorized(String),

    /// Caller's role is insufficient for the operation.
    #[error("{0}")]
    Forbidden(String),

    /// Datastore failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Payment gateway failure.
    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

impl RegistryError {
    /// HTTP status this error maps to at the route boundary.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidSignature => StatusCode::BAD_REQUEST,
            Self::EventNotFound | Self::RegistrationNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    /// Whether the JSON body carries the payment-endpoint `success` flag.
    success_flag: bool,
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Creates a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            success_flag: false,
            source: None,
        }
    }

    /// Creates a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    /// Creates a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message.into())
    }

    /// Creates a 403 Forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message.into())
    }

    /// Creates a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into())
    }

    /// Creates a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }

    /// Attaches an internal source error for logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Switches the body to the payment-endpoint shape
    /// (`{"success": false, "message": ...}`).
    #[must_use]
    pub const fn payment_wire(mut self) -> Self {
        self.success_flag = true;
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        let status = err.status();
        // Internal details stay out of the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        Self::new(status, message).with_source(anyhow::Error::new(err))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(status = %self.status, error = %source, "Request failed");
            } else {
                tracing::error!(status = %self.status, message = %self.message, "Request failed");
            }
        }

        let body = ErrorResponse {
            success: self.success_flag.then_some(false),
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_maps_to_expected_statuses() {
        assert_eq!(
            RegistryError::EventNotFound.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RegistryError::InvalidSignature.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RegistryError::Database("connection reset".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_details_from_clients() {
        let err = AppError::from(RegistryError::Database("secret dsn".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn payment_wire_sets_success_flag() {
        let err = AppError::from(RegistryError::InvalidSignature).payment_wire();
        assert!(err.success_flag);
        assert_eq!(err.message, "Invalid payment signature");
    }
}
