//! Startup configuration and logging.
//!
//! # Components
//!
//! - [`config`] - Client configuration (defaults, environment, CLI overrides)
//! - [`logging`] - File-backed `tracing` subscriber
//!
//! # Usage
//!
//! ```ignore
//! use unirag::startup::{init_logging, ClientConfig};
//!
//! let config = ClientConfig::from_env()?.apply_overrides(&overrides);
//! init_logging(&config.log_file())?;
//! ```

pub mod config;
pub mod logging;

pub use config::{
    default_data_dir, ClientConfig, ConfigError, DEFAULT_TIMEOUT_SECS, ENV_API_URL, ENV_DATA_DIR,
    ENV_TIMEOUT_SECS,
};
pub use logging::{build_filter, init_logging, LOG_ENV_VAR, LOG_FILE_NAME};
