//! Command-line argument parsing.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

/// Settings given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the TUI application (default)
    Run(CliOverrides),
}

/// Argument errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: unirag [OPTIONS]

Options:
      --api-url <URL>     Chat service base URL [env: UNIRAG_API_URL]
      --data-dir <DIR>    Directory for saved chats and logs [env: UNIRAG_DATA_DIR]
      --timeout <SECS>    Request timeout in seconds [env: UNIRAG_TIMEOUT_SECS]
  -V, --version           Print version
  -h, --help              Print help";

/// Parse command-line arguments and return the appropriate command.
///
/// `--version` and `--help` win over everything else. Options accept both
/// `--flag value` and `--flag=value`.
///
/// # Examples
///
/// ```
/// use unirag::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["unirag".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--api-url" | "--data-dir" | "--timeout" => {
                let value = match inline {
                    Some(value) => value,
                    None => args
                        .next()
                        .ok_or_else(|| ArgsError::MissingValue(flag.clone()))?,
                };
                if value.is_empty() {
                    return Err(ArgsError::MissingValue(flag.clone()));
                }
                match flag.as_str() {
                    "--api-url" => overrides.api_url = Some(value),
                    "--data-dir" => overrides.data_dir = Some(PathBuf::from(value)),
                    _ => {
                        let secs = value.parse::<u64>().map_err(|_| ArgsError::InvalidValue {
                            flag: flag.clone(),
                            value: value.clone(),
                        })?;
                        overrides.timeout_secs = Some(secs);
                    }
                }
            }
            _ => return Err(ArgsError::UnknownArgument(arg.clone())),
        }
    }
    Ok(CliCommand::Run(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut all = vec!["unirag".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_help_flags() {
        assert_eq!(parse(&["--help"]), Ok(CliCommand::Help));
        assert_eq!(parse(&["--api-url", "http://x", "-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), Ok(CliCommand::Run(CliOverrides::default())));
    }

    #[test]
    fn test_parse_options() {
        let command = parse(&["--api-url", "http://h:1", "--data-dir=/tmp/d", "--timeout", "9"]).unwrap();
        assert_eq!(
            command,
            CliCommand::Run(CliOverrides {
                api_url: Some("http://h:1".to_string()),
                data_dir: Some(PathBuf::from("/tmp/d")),
                timeout_secs: Some(9),
            })
        );
    }

    #[test]
    fn test_parse_missing_value() {
        assert_eq!(
            parse(&["--api-url"]),
            Err(ArgsError::MissingValue("--api-url".to_string()))
        );
        assert_eq!(
            parse(&["--timeout="]),
            Err(ArgsError::MissingValue("--timeout".to_string()))
        );
    }

    #[test]
    fn test_parse_invalid_timeout() {
        assert!(matches!(
            parse(&["--timeout", "soon"]),
            Err(ArgsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            Err(ArgsError::UnknownArgument("--unknown".to_string()))
        );
    }
}
