//! Configuration management utilities

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable selecting the deployment environment
pub const ENV_ENVIRONMENT: &str = "STATBOT_ENV";
/// Environment variable holding the default tracing filter
pub const ENV_LOG: &str = "STATBOT_LOG";

/// Errors raised while loading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was present but could not be interpreted
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// A configuration value failed validation
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Default tracing filter, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "statbot".to_string(),
            environment: "development".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(environment) = lookup(ENV_ENVIRONMENT) {
            config.environment = environment;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: ENV_ENVIRONMENT.to_string(),
                value: self.environment.clone(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log filter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "prod" | "production")
    }
}
