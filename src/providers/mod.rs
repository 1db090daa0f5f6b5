//! Provider module
//!
//! Defines the ProviderAdapter trait and the adapters for each supported upstream

pub mod gemini;
pub mod openai;

use crate::config::Settings;
use crate::models::UpstreamRequest;
use crate::utils::error::{AppError, AppResult};
use serde_json::Value;

/// Adapter between the gateway's inbound JSON and one provider's native request
///
/// Each adapter decides the model, the target URL, the payload shape and the
/// auth headers; `prepare` composes them into a ready-to-send request.
pub trait ProviderAdapter: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Resolve the model for this call
    fn select_model(&self, inbound: &Value) -> AppResult<String>;

    /// Build the fully-qualified upstream URL
    fn build_url(&self, model: &str) -> String;

    /// Shape the upstream payload
    fn build_payload(&self, inbound: Value, model: &str) -> AppResult<Value>;

    /// Headers sent with every upstream call
    fn auth_headers(&self) -> Vec<(&'static str, String)>;

    /// Build the complete upstream request from an inbound body
    fn prepare(&self, inbound: Value) -> AppResult<UpstreamRequest> {
        let model = self.select_model(&inbound)?;
        let url = self.build_url(&model);
        let payload = self.build_payload(inbound, &model)?;

        Ok(UpstreamRequest {
            provider: self.name(),
            model,
            url,
            payload,
            headers: self.auth_headers(),
        })
    }
}

/// Supported provider families, selected by route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAI,
    Gemini,
}

/// The configured adapter for every provider kind
#[derive(Debug, Clone)]
pub struct Providers {
    openai: OpenAIAdapter,
    gemini: GeminiAdapter,
}

impl Providers {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            openai: OpenAIAdapter::new(settings.openai.clone()),
            gemini: GeminiAdapter::new(settings.gemini.clone()),
        }
    }

    /// Get the adapter for a provider kind
    pub fn get(&self, kind: ProviderKind) -> &dyn ProviderAdapter {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Gemini => &self.gemini,
        }
    }
}

/// Read `model` from the inbound body, falling back to `default`
///
/// A JSON `null` counts as absent.
pub(crate) fn requested_model(inbound: &Value, default: &str) -> AppResult<String> {
    let body = inbound
        .as_object()
        .ok_or_else(|| AppError::Internal("Request body must be a JSON object".to_string()))?;

    match body.get("model") {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(model)) => Ok(model.clone()),
        Some(other) => Err(AppError::Internal(format!(
            "Field 'model' must be a string, got {}",
            other
        ))),
    }
}

pub use gemini::GeminiAdapter;
pub use openai::OpenAIAdapter;
