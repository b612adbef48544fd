//! Client configuration.
//!
//! Values are resolved in three layers: built-in defaults, then
//! environment variables, then command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chat_service::DEFAULT_API_URL;
use crate::cli::CliOverrides;

/// Environment variable overriding the chat service URL.
pub const ENV_API_URL: &str = "UNIRAG_API_URL";
/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "UNIRAG_DATA_DIR";
/// Environment variable overriding the request timeout (whole seconds).
pub const ENV_TIMEOUT_SECS: &str = "UNIRAG_TIMEOUT_SECS";

/// Request timeout when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Invalid configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} '{value}': expected a positive number of seconds")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("invalid {name} '{value}': expected an http:// or https:// URL")]
    InvalidApiUrl { name: &'static str, value: String },
}

/// `~/.unirag`, or `.unirag` in the working directory when there is no
/// home directory.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".unirag"))
        .unwrap_or_else(|| PathBuf::from(".unirag"))
}

/// Configuration for the chat client.
///
/// Use the builder pattern to customize.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use unirag::startup::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_url("http://chat.internal:8001")
///     .with_request_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the chat service
    pub api_url: String,
    /// Directory for the thread list and the log file
    pub data_dir: PathBuf,
    /// Upper bound for every chat service request
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Defaults overlaid with `UNIRAG_API_URL`, `UNIRAG_DATA_DIR` and
    /// `UNIRAG_TIMEOUT_SECS`. Empty variables are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api_url = parse_api_url(ENV_API_URL, &url)?;
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            config.request_timeout = parse_timeout(ENV_TIMEOUT_SECS, &secs)?;
        }
        Ok(config)
    }

    /// Apply command-line overrides on top of this configuration.
    pub fn apply_overrides(mut self, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        if let Some(url) = &overrides.api_url {
            self.api_url = parse_api_url("--api-url", url)?;
        }
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout {
                    name: "--timeout",
                    value: secs.to_string(),
                });
            }
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Path of the log file inside the data directory.
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(super::LOG_FILE_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn parse_api_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidApiUrl {
            name,
            value: value.to_string(),
        })
    }
}

fn parse_timeout(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8001");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.data_dir.ends_with(".unirag"));
        assert!(config.log_file().ends_with("unirag.log"));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_api_url("http://x:1")
            .with_data_dir("/tmp/u")
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.api_url, "http://x:1");
        assert_eq!(config.data_dir(), Path::new("/tmp/u"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://chat.example.com/"),
            (ENV_DATA_DIR, "/var/lib/unirag"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://chat.example.com");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/unirag"));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_from_lookup_ignores_empty() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "  ")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "localhost:8001")])),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_win() {
        let overrides = CliOverrides {
            api_url: Some("http://cli:9".to_string()),
            data_dir: Some(PathBuf::from("/cli")),
            timeout_secs: Some(3),
        };
        let config = ClientConfig::new()
            .with_api_url("http://env:1")
            .apply_overrides(&overrides)
            .unwrap();
        assert_eq!(config.api_url, "http://cli:9");
        assert_eq!(config.data_dir, PathBuf::from("/cli"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_empty_overrides_keep_values() {
        let base = ClientConfig::new().with_api_url("http://env:1");
        let config = base.clone().apply_overrides(&CliOverrides::default()).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_zero_timeout_override_rejected() {
        let overrides = CliOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let err = ClientConfig::new().apply_overrides(&overrides).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid --timeout '0': expected a positive number of seconds"
        );
    }
}
