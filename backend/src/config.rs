//! Configuration management for the Smart Crop Advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Log output format: "pretty" or "json"
    pub log_format: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Recommendation provider configuration
    pub provider: ProviderConfig,

    /// Geolocation capability configuration
    pub geolocation: GeolocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// "gemini" or "fake"
    pub kind: String,

    /// Gemini API key
    #[serde(default)]
    pub api_key: String,

    /// Gemini model name
    pub model: String,

    /// Generative Language API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    /// "ip", "static" or "disabled"
    pub mode: String,

    /// Fixed latitude for static mode
    pub latitude: Option<f64>,

    /// Fixed longitude for static mode
    pub longitude: Option<f64>,

    /// IP geolocation endpoint for ip mode
    pub endpoint: String,

    /// Lookup timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("log_format", "pretty")?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("provider.kind", "gemini")?
            .set_default("provider.model", "gemini-2.0-flash")?
            .set_default(
                "provider.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("provider.timeout_secs", 30)?
            .set_default("geolocation.mode", "ip")?
            .set_default("geolocation.endpoint", "http://ip-api.com/json")?
            .set_default("geolocation.timeout_secs", 5)?;

        // The credential is commonly exported without the CROP__ prefix
        if let Some(key) = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .find_map(|name| std::env::var(name).ok())
        {
            builder = builder.set_default("provider.api_key", key)?;
        }

        let config = builder
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
