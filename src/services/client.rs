//! HTTP client service
//!
//! Sends adapter-built requests to the upstream provider and classifies the outcome

use crate::models::{UpstreamOutcome, UpstreamReply, UpstreamRequest};
use crate::utils::error::UpstreamError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::Client;
use serde_json::Value;
use std::error::Error as StdError;
use tracing::{debug, info, warn};

/// Outbound transport used by the proxy handlers
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Perform one POST exchange
    async fn send(&self, request: &UpstreamRequest) -> UpstreamOutcome;
}

/// Upstream transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    /// Create a new client instance
    ///
    /// No request timeout is set; the transport defaults apply.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("llmgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, request: &UpstreamRequest) -> UpstreamOutcome {
        info!(
            "Sending request to {} API for model: {}",
            request.provider, request.model
        );

        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = match builder.json(&request.payload).send().await {
            Ok(response) => response,
            Err(e) => {
                let failure = classify_transport_error(e);
                warn!("{} API request failed before a response: {}", request.provider, failure);
                return Err(failure);
            }
        };

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| UpstreamError::Unknown(e.to_string()))?;
        info!("{} API responded with status: {}", request.provider, status);

        if let Some(status_error) = response.error_for_status_ref().err() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Http {
                status,
                message: http_error_message(status_error, &body),
            });
        }

        let bytes = response.bytes().await.map_err(classify_transport_error)?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            UpstreamError::Unknown(format!("Upstream returned a non-JSON body: {}", e))
        })?;

        debug!("Request to {} API successful with status: {}", request.provider, status);
        Ok(UpstreamReply { status, body })
    }
}

/// Map a reqwest failure onto the gateway's upstream error classes
pub fn classify_transport_error(err: reqwest::Error) -> UpstreamError {
    let timed_out = err.is_timeout();
    let unavailable = err.is_connect() || err.is_request() || err.is_body() || err.is_redirect();
    let message = error_chain(&err.without_url());

    if timed_out {
        UpstreamError::Timeout(message)
    } else if unavailable {
        UpstreamError::Connection(message)
    } else {
        UpstreamError::Unknown(message)
    }
}

/// Status error text followed by the upstream body, URL stripped so query-string keys stay out
fn http_error_message(status_error: reqwest::Error, body: &str) -> String {
    let summary = status_error.without_url().to_string();
    let body = body.trim();

    if body.is_empty() {
        summary
    } else {
        format!("{}: {}", summary, body)
    }
}

/// Render an error with its source chain, joined by ": "
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
