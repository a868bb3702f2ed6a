//! Deploy-time configuration.
//!
//! Values come from three layers, later ones winning:
//!
//! 1. built-in defaults ([`ConnectorConfig::default`]),
//! 2. an optional TOML file,
//! 3. `WAKE_ORDER__*` environment variables (e.g. `WAKE_ORDER__MAX_ATTEMPTS=10`).
//!
//! The result is read once at startup and never changes afterwards.

pub mod error;

pub use error::*;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api-dev.benova.com.br/cart/update-wake-order";
pub const DEFAULT_CHECK_INTERVAL_MS: u64 = 500;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "WAKE_ORDER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Endpoint receiving the update-wake-order POST.
    pub api_url: String,
    /// Delay between two readiness checks of one loop.
    pub check_interval_ms: u64,
    /// Readiness checks a loop performs before giving up.
    pub max_attempts: u32,
    /// Emit diagnostic logs.
    pub debug: bool,
    /// Transport timeout for the outbound request.
    pub request_timeout_ms: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            check_interval_ms: DEFAULT_CHECK_INTERVAL_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            debug: true,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ConnectorConfig {
    /// Loads defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&ConnectorConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let loaded: ConnectorConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::Invalid(format!("api_url '{}': {}", self.api_url, e)))?;
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if self.check_interval_ms == 0 {
            return Err(ConfigError::Invalid("check_interval_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    /// Serializes every test that calls `load`, since they all read the environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets variables for one test and removes them afterwards.
    struct EnvGuard {
        keys: Vec<&'static str>,
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            for (key, value) in vars {
                env::set_var(key, value);
            }
            Self {
                keys: vars.iter().map(|(key, _)| *key).collect(),
                _lock: lock,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_are_valid() {
        let config = ConnectorConfig::default();
        assert_eq!(config.check_interval(), Duration::from_millis(500));
        assert_eq!(config.max_attempts, 20);
        assert!(config.debug);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let _env = EnvGuard::set(&[]);
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "max_attempts = 5").unwrap();
        writeln!(file, "check_interval_ms = 250").unwrap();
        writeln!(file, "debug = false").unwrap();

        let config = ConnectorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.check_interval_ms, 250);
        assert!(!config.debug);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn missing_file_is_an_error() {
        let _env = EnvGuard::set(&[]);
        let dir = tempfile::tempdir().unwrap();
        let result = ConnectorConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn validation_rejects_degenerate_values() {
        let zero_attempts = ConnectorConfig {
            max_attempts: 0,
            ..ConnectorConfig::default()
        };
        assert!(matches!(zero_attempts.validate(), Err(ConfigError::Invalid(_))));

        let bad_url = ConnectorConfig {
            api_url: "::".into(),
            ..ConnectorConfig::default()
        };
        assert!(matches!(bad_url.validate(), Err(ConfigError::Invalid(_))));

        let zero_interval = ConnectorConfig {
            check_interval_ms: 0,
            ..ConnectorConfig::default()
        };
        assert!(matches!(zero_interval.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn environment_overrides_file_and_defaults() {
        let _env = EnvGuard::set(&[
            ("WAKE_ORDER__MAX_ATTEMPTS", "7"),
            ("WAKE_ORDER__DEBUG", "false"),
        ]);
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "max_attempts = 5").unwrap();
        writeln!(file, "debug = true").unwrap();
        writeln!(file, "check_interval_ms = 250").unwrap();

        let config = ConnectorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.max_attempts, 7);
        assert!(!config.debug);
        assert_eq!(config.check_interval_ms, 250);

        let config = ConnectorConfig::load(None).unwrap();
        assert_eq!(config.max_attempts, 7);
        assert!(!config.debug);
        assert_eq!(config.check_interval_ms, DEFAULT_CHECK_INTERVAL_MS);
    }

    #[test]
    fn environment_values_are_validated() {
        let _env = EnvGuard::set(&[("WAKE_ORDER__CHECK_INTERVAL_MS", "0")]);
        assert!(matches!(ConnectorConfig::load(None), Err(ConfigError::Invalid(_))));
    }
}
