use std::fs;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Invalid PORT value '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("No port configured: set PORT, pass --port or add [server] port to the config file")]
    MissingPort,
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/counters/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("counters").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Every seed counter has a non-blank title
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.seed.iter().position(|seed| seed.title.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("seed counter #{} has an empty title", index + 1),
            });
        }

        Ok(())
    }

    /// Applies the value of the `PORT` environment variable, if any.
    pub fn with_env_port(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value {
            let port = value.trim().parse::<u16>().map_err(|e| ConfigError::InvalidPort {
                value: value.to_string(),
                source: e,
            })?;
            self.server.port = Some(port);
        }
        Ok(self)
    }

    /// The port to bind, failing when none was configured anywhere.
    pub fn resolve_port(&self) -> Result<u16, ConfigError> {
        self.server.port.ok_or(ConfigError::MissingPort)
    }
}
