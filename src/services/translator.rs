//! Response translation
//!
//! Turns an upstream outcome into the response returned to the caller

use crate::models::UpstreamOutcome;
use crate::utils::error::AppError;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

/// Translate an upstream outcome into the caller-facing response
///
/// Successful replies are passed through verbatim with the upstream status;
/// failures become the error envelope.
pub fn translate(outcome: UpstreamOutcome) -> Response {
    match outcome {
        Ok(reply) => {
            info!("Upstream request successful with status: {}", reply.status);
            (reply.status, Json(reply.body)).into_response()
        }
        Err(e) => AppError::Upstream(e).into_response(),
    }
}
