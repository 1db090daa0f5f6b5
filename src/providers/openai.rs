//! OpenAI Provider implementation
//!
//! Routes `gpt-*` models to chat completions and every other model to the
//! legacy engines completion endpoint. The caller's body is forwarded as-is
//! apart from the resolved `model`.

use super::{requested_model, ProviderAdapter};
use crate::config::ProviderConfig;
use crate::utils::error::{AppError, AppResult};
use serde_json::Value;

/// OpenAI-style adapter
#[derive(Debug, Clone)]
pub struct OpenAIAdapter {
    config: ProviderConfig,
}

impl OpenAIAdapter {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl ProviderAdapter for OpenAIAdapter {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn select_model(&self, inbound: &Value) -> AppResult<String> {
        requested_model(inbound, &self.config.default_model)
    }

    fn build_url(&self, model: &str) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        if model.starts_with("gpt-") {
            format!("{}/chat/completions", base_url)
        } else {
            format!("{}/engines/{}/completions", base_url, model)
        }
    }

    fn build_payload(&self, inbound: Value, model: &str) -> AppResult<Value> {
        let Value::Object(mut body) = inbound else {
            return Err(AppError::Internal("Request body must be a JSON object".to_string()));
        };
        body.insert("model".to_string(), Value::String(model.to_string()));
        Ok(Value::Object(body))
    }

    fn auth_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", format!("Bearer {}", self.config.api_key)),
            ("Content-Type", "application/json".to_string()),
        ]
    }
}
