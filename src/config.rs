//! Configuration management for the `Hayfever` gateway
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings.

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HayfeverConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Google Pollen API configuration
    #[serde(default)]
    pub pollen: PollenApiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Google Pollen API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollenApiConfig {
    /// API key; calls are still attempted without one
    pub api_key: Option<String>,
    /// Base URL for the pollen API
    #[serde(default = "default_pollen_base_url")]
    pub base_url: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_pollen_base_url() -> String {
    "https://pollen.googleapis.com/v1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for PollenApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_pollen_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl HayfeverConfig {
    /// Load configuration from environment variables only
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from an optional TOML file plus the environment.
    ///
    /// Priority, lowest first: defaults, file, `HAYFEVER_*` variables, bare
    /// `API_KEY` / `PORT`.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(config_file) = config_path.filter(|path| path.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // HAYFEVER_POLLEN__API_KEY, HAYFEVER_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("HAYFEVER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder = builder
            .set_override_option("pollen.api_key", std::env::var("API_KEY").ok())
            .with_context(|| "Failed to apply API_KEY")?
            .set_override_option("server.port", std::env::var("PORT").ok())
            .with_context(|| "Failed to apply PORT")?;

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: HayfeverConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .pollen
            .api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.pollen.api_key = None;
        }
        if self.pollen.base_url.is_empty() {
            self.pollen.base_url = default_pollen_base_url();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Whether calls will go out without an API key
    #[must_use]
    pub fn api_key_missing(&self) -> bool {
        self.pollen.api_key.is_none()
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            );
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            );
        }

        if !self.pollen.base_url.starts_with("http://")
            && !self.pollen.base_url.starts_with("https://")
        {
            bail!("Pollen API base URL must be a valid HTTP or HTTPS URL");
        }

        Ok(())
    }
}
