// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::BatchConfig;
use crate::errors::{NetunoBatchError, Result};

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization (with section defaults applied by
/// `serde`); it does **not** perform semantic validation. Use
/// [`load_or_default`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<BatchConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: BatchConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Resolve the effective configuration: the file at `path` when given,
/// built-in Netuno 4 defaults otherwise. Validates either way.
pub fn load_or_default(path: Option<&Path>) -> Result<BatchConfig> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading batch configuration");
            load_from_path(path)?
        }
        None => BatchConfig::default(),
    };
    validate(&config)?;
    Ok(config)
}

fn validate(config: &BatchConfig) -> Result<()> {
    if config.initial_dates.is_empty() {
        return Err(NetunoBatchError::Config(
            "initial_dates must map every scenario to a start date".to_string(),
        ));
    }
    if config.parameters.is_empty() {
        return Err(NetunoBatchError::Config(
            "parameters must not be empty; the first run applies them".to_string(),
        ));
    }
    if config.timing.poll_interval_secs <= 0.0 {
        return Err(NetunoBatchError::Config(
            "timing.poll_interval_secs must be positive".to_string(),
        ));
    }
    if config.timing.startup_wait_secs < 0.0 || config.timing.run_timeout_secs < 0.0 {
        return Err(NetunoBatchError::Config(
            "timing waits must not be negative".to_string(),
        ));
    }
    if config.automation.bridge_cmd.trim().is_empty() {
        return Err(NetunoBatchError::Config(
            "automation.bridge_cmd must name the bridge command".to_string(),
        ));
    }
    Ok(())
}
