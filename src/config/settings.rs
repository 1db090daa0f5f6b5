//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Shared-secret configuration
    pub security: SecurityConfig,
    /// OpenAI-style upstream configuration
    pub openai: ProviderConfig,
    /// Gemini-style upstream configuration
    pub gemini: ProviderConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Shared secret expected in the `X-API-KEY` header
    pub access_key: String,
}

/// Upstream provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model used when the caller does not name one
    pub default_model: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive
    pub level: String,
    /// Log format (text/json)
    pub format: String,
    /// Optional log file, appended to alongside console output
    pub file: Option<String>,
}

impl Settings {
    /// Create a new configuration instance, reading `.env` first
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_env()
    }

    /// Build the configuration from process environment variables only
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("HOST", "127.0.0.1"),
                port: get_env_or_default("PORT", "5000")
                    .parse()
                    .context("Invalid port number")?,
            },
            security: SecurityConfig {
                access_key: env::var("API_ACCESS_KEY")
                    .context("API_ACCESS_KEY environment variable not set")?,
            },
            openai: ProviderConfig {
                api_key: env::var("OPENAI_API_KEY")
                    .context("OPENAI_API_KEY environment variable not set")?,
                base_url: get_env_or_default("OPENAI_API_URL", "https://api.openai.com/v1"),
                default_model: get_env_or_default("DEFAULT_OPENAI_MODEL", "gpt-3.5-turbo"),
            },
            gemini: ProviderConfig {
                api_key: env::var("GEMINI_API_KEY")
                    .context("GEMINI_API_KEY environment variable not set")?,
                base_url: get_env_or_default(
                    "GEMINI_API_URL",
                    "https://generativelanguage.googleapis.com/v1beta/models/",
                ),
                default_model: get_env_or_default("DEFAULT_GEMINI_MODEL", "gemini-pro"),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
                file: Some(get_env_or_default("LOG_FILE", "app.log"))
                    .filter(|path| !path.trim().is_empty()),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.security.access_key.is_empty() {
            anyhow::bail!("API access key cannot be empty");
        }

        for (name, provider) in [("OpenAI", &self.openai), ("Gemini", &self.gemini)] {
            if provider.api_key.is_empty() {
                anyhow::bail!("{} API key cannot be empty", name);
            }

            if provider.api_key.contains(char::is_whitespace) {
                anyhow::bail!("{} API key cannot contain whitespace characters", name);
            }

            if !provider.base_url.starts_with("http") {
                anyhow::bail!("Invalid {} base URL format, should start with 'http'", name);
            }

            if provider.default_model.trim().is_empty() {
                anyhow::bail!("{} default model cannot be empty", name);
            }
        }

        // Validate log filter
        tracing_subscriber::EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log level: {}", self.logging.level))?;

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
