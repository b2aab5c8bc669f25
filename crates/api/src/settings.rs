//! Service settings
//!
//! Layered with the `config` crate, later sources winning:
//! `config/default.toml` (optional), the file named by `REVENUE_CONFIG`,
//! then `REVENUE__SECTION__KEY` environment variables.

use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use data_validator::ValidationConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Env var naming an extra settings file
pub const CONFIG_PATH_ENV: &str = "REVENUE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub logging: LoggingSettings,
    pub metrics: MetricsSettings,
    /// Accepted input ranges
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
    /// Allow browser form front ends on other origins
    pub cors: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            cors: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// JSON model artifact, loaded once at start-up
    pub artifact_path: PathBuf,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("models/linear_model.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Install the Prometheus recorder and serve `/metrics`
    pub enabled: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    /// Load from the default file, `REVENUE_CONFIG` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::from_builder(file_layers(config_path.as_deref()), environment())
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>, env: Environment) -> Result<Self, ConfigError> {
        builder.add_source(env).build()?.try_deserialize()
    }
}

/// Default file, then the explicit one if given (which must exist)
fn file_layers(config_path: Option<&str>) -> ConfigBuilder<DefaultState> {
    let builder = Config::builder().add_source(File::with_name("config/default").required(false));
    match config_path {
        Some(path) => builder.add_source(File::with_name(path)),
        None => builder,
    }
}

/// `REVENUE__SERVER__ADDR` sets `server.addr`
fn environment() -> Environment {
    Environment::with_prefix("REVENUE")
        .separator("__")
        .try_parsing(true)
}
