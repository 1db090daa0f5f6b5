//! Fallback handlers
//!
//! Unmatched routes, wrong methods and panics escaping a handler

use crate::middleware::ClientAddr;
use crate::utils::error::AppError;
use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::warn;

/// 404 for any path without a route
pub async fn not_found(client: ClientAddr, uri: Uri) -> Response {
    warn!("404 Not Found: {} from IP: {}", uri.path(), client);
    AppError::NotFound(uri.path().to_string()).into_response()
}

/// 405 for a known path hit with the wrong method
pub async fn method_not_allowed(client: ClientAddr, method: Method, uri: Uri) -> Response {
    warn!("405 Method Not Allowed: {} {} from IP: {}", method, uri.path(), client);
    AppError::MethodNotAllowed.into_response()
}

/// Last-resort conversion of a handler panic into the 500 envelope
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AppError::Internal(message).into_response()
}
