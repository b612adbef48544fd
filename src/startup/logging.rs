//! Logging setup.
//!
//! The terminal belongs to the UI, so log records go to a file in the data
//! directory. The filter comes from `UNIRAG_LOG` (same syntax as
//! `RUST_LOG`) and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "UNIRAG_LOG";

/// File name of the log inside the data directory.
pub const LOG_FILE_NAME: &str = "unirag.log";

/// Build the log filter from a directive, falling back to `info` when the
/// directive is missing or does not parse.
pub fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global `tracing` subscriber writing to `log_path`.
///
/// Parent directories are created. Calling this more than once keeps the
/// first subscriber.
pub fn init_logging(log_path: &Path) -> io::Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let directive = std::env::var(LOG_ENV_VAR).ok();
    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(path = %log_path.display(), "Logging initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_filter_defaults_to_info() {
        assert!(build_filter(None).to_string().contains("info"));
        assert!(build_filter(Some("unirag=debug")).to_string().contains("unirag"));
    }

    #[test]
    fn test_init_logging_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(LOG_FILE_NAME);
        init_logging(&path).unwrap();
        assert!(path.exists());

        // A second call is harmless
        init_logging(&path).unwrap();
    }
}
