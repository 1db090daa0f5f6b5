//! Error handling module
//!
//! Defines the gateway's error types and the `{error, message}` envelope they render to

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single upstream call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// Connection could not be established or the exchange broke off
    #[error("{0}")]
    Connection(String),

    /// Exchange timed out
    #[error("{0}")]
    Timeout(String),

    /// Anything the transport could not classify
    #[error("{0}")]
    Unknown(String),
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or wrong shared secret
    #[error("Invalid or missing API key")]
    Forbidden,

    /// No route matched; carries the requested path for logging
    #[error("The requested resource was not found")]
    NotFound(String),

    /// Route exists but not for this method
    #[error("The requested method is not allowed for this resource")]
    MethodNotAllowed,

    /// Upstream call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Unclassified failure
    #[error("{0}")]
    Internal(String),
}

/// Log severity attached to an error class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

/// Error envelope returned on every non-success path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind label
    pub error: String,
    /// Human readable message
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream(UpstreamError::Http { status, .. }) => *status,
            AppError::Upstream(UpstreamError::Connection(_) | UpstreamError::Timeout(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Upstream(UpstreamError::Unknown(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the envelope's `error` label
    pub fn error_label(&self) -> &'static str {
        match self {
            AppError::Forbidden => "Forbidden",
            AppError::NotFound(_) => "Not Found",
            AppError::MethodNotAllowed => "Method Not Allowed",
            AppError::Upstream(UpstreamError::Http { .. }) => "HTTP Error",
            AppError::Upstream(UpstreamError::Connection(_) | UpstreamError::Timeout(_)) => {
                "Service Unavailable"
            }
            AppError::Upstream(UpstreamError::Unknown(_)) | AppError::Internal(_) => {
                "Internal Server Error"
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AppError::Forbidden | AppError::NotFound(_) | AppError::MethodNotAllowed => {
                Severity::Warning
            }
            AppError::Upstream(UpstreamError::Http { .. })
            | AppError::Upstream(UpstreamError::Connection(_))
            | AppError::Upstream(UpstreamError::Timeout(_)) => Severity::Error,
            AppError::Upstream(UpstreamError::Unknown(_)) | AppError::Internal(_) => {
                Severity::Critical
            }
        }
    }

    /// Convert to the response envelope
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.error_label().to_string(),
            message: self.to_string(),
        }
    }

    /// Log error-class failures.
    ///
    /// Warning-class errors are logged at their detection site, which has the
    /// caller address and path.
    fn log(&self) {
        match (self.severity(), self) {
            (Severity::Warning, _) => {}
            (Severity::Error, AppError::Upstream(UpstreamError::Http { status, .. })) => {
                tracing::error!("HTTP error occurred: {} - Status code: {}", self, status);
            }
            (Severity::Error, _) => {
                tracing::error!("Request exception occurred: {}", self);
            }
            (Severity::Critical, _) => {
                tracing::error!(severity = "critical", "Unhandled exception occurred: {}", self);
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Wrap any error as an internal failure with a leading message
    fn internal_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn internal_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Internal(format!("{}: {}", message, e)))
    }
}
