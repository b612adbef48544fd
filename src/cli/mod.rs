//! Command-line interface.
//!
//! The dispatcher runs before the TUI starts:
//!
//! ```ignore
//! use unirag::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! if let Some(overrides) = run_cli_command(command) {
//!     // start the TUI with `overrides`
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CliOverrides, USAGE};
pub use version::{version_line, VERSION};

/// Handle informational commands.
///
/// Prints and returns `None` for `--version` and `--help`; returns the
/// overrides to start the TUI with otherwise.
pub fn run_cli_command(command: CliCommand) -> Option<CliOverrides> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            None
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            None
        }
        CliCommand::Run(overrides) => Some(overrides),
    }
}
