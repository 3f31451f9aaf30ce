//! Configuration management for the rsproof server.
//!
//! This module provides configuration loading with multiple sources:
//! 1. Default values (hardcoded)
//! 2. Configuration file (YAML)
//! 3. Environment variables (override)
//!
//! # Configuration Hierarchy
//!
//! Environment variables take precedence over config file values,
//! which take precedence over defaults. The bare `PORT` variable set by
//! most container platforms is honoured for `server.port` unless
//! `RSPROOF_SERVER__PORT` is also set.
//!
//! # Example
//!
//! ```ignore
//! use rsproof_server::config::ServerConfig;
//!
//! // Load from file with env overrides
//! let config = ServerConfig::load("config.yaml")?;
//!
//! // Or load from environment only
//! let config = ServerConfig::from_env()?;
//! ```

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use rsproof_domain::CheckEngineConfig;

use crate::handlers::check::CheckLimits;

const ENV_PREFIX: &str = "RSPROOF";
const PLATFORM_PORT_VAR: &str = "PORT";
const PORT_OVERRIDE_VAR: &str = "RSPROOF_SERVER__PORT";

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Grammar engine settings
    #[serde(default)]
    pub engine: EngineSettings,

    /// Request limits
    #[serde(default)]
    pub limits: LimitsSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Metrics settings
    #[serde(default)]
    pub metrics: MetricsSettings,
}

/// Server network settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    /// Allow cross-origin requests from any origin
    #[serde(default)]
    pub cors: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            body_limit_bytes: default_body_limit(),
            cors: false,
        }
    }
}

impl ServerSettings {
    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_body_limit() -> usize {
    2 * 1024 * 1024
}

/// Grammar engine settings.
///
/// # Example YAML Configuration
///
/// ```yaml
/// engine:
///   backend: languagetool
///   base_url: http://localhost:8081
///   language: en-US
///   timeout_secs: 10
///   serialize_calls: false
///   max_concurrency: 4
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EngineSettings {
    /// Engine backend; only "languagetool" is supported
    #[serde(default = "default_engine_backend")]
    pub backend: String,

    /// Root URL of the engine server
    #[serde(default = "default_engine_url")]
    pub base_url: String,

    /// Language every text is checked in
    #[serde(default = "default_language")]
    pub language: String,

    /// Per-call engine timeout in seconds
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,

    /// Route every engine call through a single lock.
    ///
    /// For engines that cannot serve concurrent analyses.
    /// Environment variable: `RSPROOF_ENGINE__SERIALIZE_CALLS`
    #[serde(default)]
    pub serialize_calls: bool,

    /// Texts of one bulk check analyzed concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            backend: default_engine_backend(),
            base_url: default_engine_url(),
            language: default_language(),
            timeout_secs: default_engine_timeout(),
            serialize_calls: false,
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl EngineSettings {
    /// Per-call engine timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check engine configuration derived from these settings.
    pub fn check_engine_config(&self) -> CheckEngineConfig {
        CheckEngineConfig::default().with_max_concurrency(self.max_concurrency)
    }
}

fn default_engine_backend() -> String {
    "languagetool".to_string()
}

fn default_engine_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_engine_timeout() -> u64 {
    10
}

fn default_max_concurrency() -> usize {
    4
}

/// Request limits enforced before texts reach the engine.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LimitsSettings {
    /// Maximum number of texts in one bulk check
    #[serde(default = "default_max_bulk_texts")]
    pub max_bulk_texts: usize,

    /// Maximum characters in a single text
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            max_bulk_texts: default_max_bulk_texts(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl From<&LimitsSettings> for CheckLimits {
    fn from(settings: &LimitsSettings) -> Self {
        CheckLimits {
            max_bulk_texts: settings.max_bulk_texts,
            max_text_chars: settings.max_text_chars,
        }
    }
}

fn default_max_bulk_texts() -> usize {
    100
}

fn default_max_text_chars() -> usize {
    100_000
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format (true for production, false for development)
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MetricsSettings {
    /// Expose the Prometheus endpoint
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable overrides.
    ///
    /// Environment variables are prefixed with `RSPROOF_` and use `__` as separator.
    /// For example:
    /// - `RSPROOF_SERVER__PORT=9090` overrides `server.port`
    /// - `RSPROOF_ENGINE__BASE_URL=...` overrides `engine.base_url`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let builder = Config::builder()
            .add_source(Config::try_from(&ServerConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml));

        Self::finish(builder)
    }

    /// Load configuration from environment variables only.
    ///
    /// Uses default values and allows overrides via RSPROOF_ prefixed env vars.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let builder = Config::builder().add_source(Config::try_from(&ServerConfig::default())?);

        Self::finish(builder)
    }

    /// Layers the environment on top of `builder`, then deserializes and validates.
    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigLoadError> {
        let mut builder = builder.add_source(
            // RSPROOF_ENGINE__BASE_URL -> engine.base_url
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        if std::env::var_os(PORT_OVERRIDE_VAR).is_none() {
            if let Some(port) = platform_port()? {
                builder = builder.set_override("server.port", i64::from(port))?;
            }
        }

        let server_config: ServerConfig = builder.build()?.try_deserialize()?;
        server_config.validate()?;

        Ok(server_config)
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.server.port == 0 {
            return Err(invalid("server.port must be greater than 0"));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs must be greater than 0"));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(invalid("server.body_limit_bytes must be greater than 0"));
        }

        let valid_backends = ["languagetool"];
        if !valid_backends.contains(&self.engine.backend.as_str()) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "engine.backend must be one of: {:?}, got: {}",
                    valid_backends, self.engine.backend
                ),
            });
        }

        if self.engine.base_url.trim().is_empty() {
            return Err(invalid("engine.base_url cannot be empty"));
        }

        if self.engine.language.trim().is_empty() {
            return Err(invalid("engine.language cannot be empty"));
        }

        if self.engine.timeout_secs == 0 {
            return Err(invalid("engine.timeout_secs must be greater than 0"));
        }

        if self.engine.max_concurrency == 0 {
            return Err(invalid("engine.max_concurrency must be greater than 0"));
        }

        if self.limits.max_bulk_texts == 0 {
            return Err(invalid("limits.max_bulk_texts must be greater than 0"));
        }

        if self.limits.max_text_chars == 0 {
            return Err(invalid("limits.max_text_chars must be greater than 0"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "logging.level must be one of: {:?}, got: {}",
                    valid_levels, self.logging.level
                ),
            });
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigLoadError {
    ConfigLoadError::Invalid {
        message: message.to_string(),
    }
}

/// Reads the platform-assigned `PORT`, if any.
fn platform_port() -> Result<Option<u16>, ConfigLoadError> {
    match std::env::var(PLATFORM_PORT_VAR) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| ConfigLoadError::Invalid {
                message: format!("PORT must be a valid port number, got: {raw}"),
            }),
        Err(_) => Ok(None),
    }
}
