// src/errors.rs

//! Crate-wide error taxonomy and `Result` alias.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetunoBatchError {
    #[error("invalid Netuno executable: {0:?} is not an existing file")]
    InvalidNetunoExecutable(PathBuf),

    #[error("invalid source directory: {0:?} is not an existing directory")]
    InvalidSourceDirectory(PathBuf),

    #[error("no precipitation input files found in {0:?}")]
    MissingInputData(PathBuf),

    #[error("failed to launch Netuno: {0}")]
    ProcessLaunch(String),

    #[error("{operation} is not allowed: {reason}")]
    InvalidDriverState {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("automation step '{step}' failed: {reason}")]
    Automation { step: String, reason: String },

    #[error("simulation run did not complete within {0:?}")]
    SimulationTimeout(Duration),

    #[error("file name {0:?} does not match '<city>_<model>_<scenario>.csv'")]
    UnparsableFileName(PathBuf),

    #[error("no initial date configured for scenario '{0}'")]
    MissingInitialDate(String),

    #[error("failed to parse results at {path:?}: {reason}")]
    ResultParse { path: PathBuf, reason: String },

    #[error("failed to write exported results: {0}")]
    ExportWrite(#[source] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, NetunoBatchError>;
