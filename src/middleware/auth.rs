//! Authentication middleware
//!
//! Gates the proxy routes behind the shared secret in `X-API-KEY`

use super::client_ip::ClientAddr;
use crate::handlers::AppState;
use crate::utils::error::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Authentication middleware
///
/// Rejects the request with 403 before the wrapped handler runs unless the
/// header matches the configured secret.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    request: Request,
    next: Next,
) -> Response {
    if is_authorized(request.headers(), &state.settings.security.access_key) {
        debug!("Authentication successful");
        return next.run(request).await;
    }

    warn!("Unauthorized access attempt from IP: {}", client);
    AppError::Forbidden.into_response()
}

/// Byte-for-byte comparison of the `X-API-KEY` header against the secret
pub fn is_authorized(headers: &HeaderMap, access_key: &str) -> bool {
    headers
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes() == access_key.as_bytes())
        .unwrap_or(false)
}
