//! Provider proxy handlers
//!
//! POST /api/openai, /api/openai/chat/completions and /v1/generate

use crate::handlers::AppState;
use crate::middleware::ClientAddr;
use crate::providers::ProviderKind;
use crate::services::translate;
use crate::utils::error::{AppError, AppResult, ErrorContext};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Response,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Handle OpenAI-style requests
pub async fn handle_openai(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    proxy(&state, ProviderKind::OpenAI, client, body).await
}

/// Handle Gemini-style requests
pub async fn handle_gemini(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    proxy(&state, ProviderKind::Gemini, client, body).await
}

/// Build the upstream request with the route's adapter, send it and translate the outcome
async fn proxy(
    state: &AppState,
    kind: ProviderKind,
    client: ClientAddr,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    let body = body.map_err(|e| AppError::Internal(e.body_text()))?;
    let inbound = parse_inbound(&body)?;

    let request = state.providers.get(kind).prepare(inbound)?;
    info!(
        "Received request for {} model: {} from IP: {}",
        request.provider, request.model, client
    );

    let outcome = state.upstream.send(&request).await;
    Ok(translate(outcome))
}

fn parse_inbound(body: &[u8]) -> AppResult<Value> {
    serde_json::from_slice(body).internal_context("Failed to parse request body as JSON")
}
