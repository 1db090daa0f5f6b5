//! LLM Gateway Library
//!
//! Single-key authenticated gateway in front of OpenAI-style and Gemini-style APIs

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, create_router_with_upstream, AppState};
pub use providers::{ProviderAdapter, ProviderKind, Providers};
pub use services::{HttpUpstream, Upstream};
pub use utils::error::{AppError, AppResult, ErrorEnvelope, UpstreamError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
