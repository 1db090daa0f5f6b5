//! Gemini Provider implementation
//!
//! Wraps the caller's `input` into a single-part `generateContent` request.
//! The API key travels in the query string.

use super::{requested_model, ProviderAdapter};
use crate::config::ProviderConfig;
use crate::utils::error::AppResult;
use serde_json::{json, Value};

/// Gemini-style adapter
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    config: ProviderConfig,
}

impl GeminiAdapter {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn select_model(&self, inbound: &Value) -> AppResult<String> {
        requested_model(inbound, &self.config.default_model)
    }

    // Base URL is expected to end with the models path, e.g. `.../v1beta/models/`
    fn build_url(&self, model: &str) -> String {
        format!(
            "{}{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        )
    }

    fn build_payload(&self, inbound: Value, _model: &str) -> AppResult<Value> {
        let input = inbound
            .get("input")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));

        Ok(json!({
            "contents": [
                {
                    "parts": [
                        {"text": input}
                    ]
                }
            ]
        }))
    }

    fn auth_headers(&self) -> Vec<(&'static str, String)> {
        vec![("Content-Type", "application/json".to_string())]
    }
}
