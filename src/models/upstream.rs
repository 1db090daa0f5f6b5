//! Upstream exchange data models
//!
//! Per-request values passed between the adapters, the upstream client and the translator

use axum::http::StatusCode;
use serde_json::Value;

use crate::utils::error::UpstreamError;

/// A provider-shaped request ready to be sent upstream
///
/// Built fresh for every inbound call and dropped once the call completes.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// Provider display name, used in logs
    pub provider: &'static str,
    /// Resolved model name
    pub model: String,
    /// Fully-qualified target URL
    pub url: String,
    /// JSON payload
    pub payload: Value,
    /// Provider headers (auth and content type)
    pub headers: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A completed 2xx exchange
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Value,
}

/// Result of one upstream call
pub type UpstreamOutcome = Result<UpstreamReply, UpstreamError>;
