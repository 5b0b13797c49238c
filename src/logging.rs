// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--verbose` (DEBUG) or `--quiet` flags (WARN once, ERROR twice+)
//! 2. `NETUNO_BATCH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to STDERR so stdout stays clean.

use anyhow::Result;
use tracing_subscriber::fmt;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(quiet: u8, verbose: bool) -> Result<()> {
    let level = resolve_level(quiet, verbose);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn resolve_level(quiet: u8, verbose: bool) -> tracing::Level {
    if verbose {
        return tracing::Level::DEBUG;
    }
    match quiet {
        0 => std::env::var("NETUNO_BATCH_LOG")
            .ok()
            .and_then(|value| parse_level_str(&value))
            .unwrap_or(tracing::Level::INFO),
        1 => tracing::Level::WARN,
        _ => tracing::Level::ERROR,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
