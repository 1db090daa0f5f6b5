//! Configuration management module
//!
//! Loads the gateway's immutable settings from environment variables and an optional `.env` file.

pub mod settings;

pub use settings::{LoggingConfig, ProviderConfig, SecurityConfig, ServerConfig, Settings};
