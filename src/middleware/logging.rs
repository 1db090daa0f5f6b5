//! Logging middleware
//!
//! Records HTTP request and response information

use super::client_ip::ClientAddr;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Request logging middleware
///
/// Opens a span per request and logs status class and duration on completion
pub async fn request_logging_middleware(
    client: ClientAddr,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        client = %client,
    );

    async move {
        info!("Request started: {} {} from IP: {}", method, uri, client);

        let response = next.run(request).await;

        let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        let status = response.status();

        if status.is_success() {
            info!("Request completed: {} - Duration: {:.2}ms", status, duration_ms);
        } else if status.is_client_error() {
            warn!("Client error: {} - Duration: {:.2}ms", status, duration_ms);
        } else if status.is_server_error() {
            warn!("Server error: {} - Duration: {:.2}ms", status, duration_ms);
        } else {
            info!("Request response: {} - Duration: {:.2}ms", status, duration_ms);
        }

        response
    }
    .instrument(span)
    .await
}
