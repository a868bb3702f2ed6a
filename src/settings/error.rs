//! Error types for configuration loading.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized.
    #[error("Failed to load configuration: {0}")]
    Load(String),

    /// A value was read but makes no sense.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The HTTP client could not be built from the configuration.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Load(e.to_string())
    }
}
