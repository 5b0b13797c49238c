// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::errors::{NetunoBatchError, Result};

/// Command-line arguments for `netuno-batch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "netuno-batch",
    version,
    about = "Batch-drive the Netuno rainwater simulator over a directory of precipitation files.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a Netuno executable file.
    #[arg(value_name = "path/to/netuno.exe")]
    pub netuno_exe_path: PathBuf,

    /// Path to a directory containing the input precipitation data files, in
    /// CSV format.
    #[arg(value_name = "path/to/precipitation")]
    pub precipitation_dir_path: PathBuf,

    /// Turn on quiet mode (cumulative): hide log entries below WARNING, then
    /// below ERROR. Ignored if --verbose is present.
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Turn on verbose mode, displaying all log messages of level DEBUG and
    /// above. Overrides --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML file overriding simulation parameters, initial dates, driver
    /// timing, or the automation bridge.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Validate the positional paths. Runs before anything else; on failure
    /// the core is never invoked.
    pub fn validate(&self) -> Result<()> {
        if !self.netuno_exe_path.is_file() {
            return Err(NetunoBatchError::InvalidNetunoExecutable(
                self.netuno_exe_path.clone(),
            ));
        }
        if !self.precipitation_dir_path.is_dir() {
            return Err(NetunoBatchError::InvalidSourceDirectory(
                self.precipitation_dir_path.clone(),
            ));
        }
        Ok(())
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
