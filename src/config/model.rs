// src/config/model.rs

//! Batch configuration as read from an optional TOML file.
//!
//! Every section has built-in Netuno 4 defaults, so the tool runs without a
//! config file at all:
//!
//! ```toml
//! [parameters]
//! catchment_area_m2 = "100"
//!
//! [initial_dates]
//! rcp45 = "01/01/2006"
//!
//! [timing]
//! startup_wait_secs = 5.0
//! run_timeout_secs = 600.0
//! poll_interval_secs = 0.5
//!
//! [automation]
//! bridge_cmd = "netuno-bridge"
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{NetunoBatchError, Result};

/// Named simulation parameters, applied once per session by the first run.
///
/// Ordered so UI fields are always filled in the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SimulationParameters(BTreeMap<String, String>);

impl SimulationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The Netuno 4 rainwater-harvesting inputs the first run fills in.
    pub fn netuno_defaults() -> Self {
        let entries = [
            ("catchment_area_m2", "100"),
            ("first_flush_mm", "2"),
            ("runoff_coefficient", "0.8"),
            ("daily_demand_l_per_capita", "150"),
            ("residents", "4"),
            ("rainwater_replacement_pct", "40"),
            ("upper_reservoir_l", "500"),
            ("lower_reservoir_l", "3000"),
        ];
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for SimulationParameters {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Start date per climate scenario, in the `dd/mm/yyyy` form the simulator's
/// date field expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct InitialDates(BTreeMap<String, String>);

impl InitialDates {
    pub fn insert(&mut self, scenario: impl Into<String>, date: impl Into<String>) {
        self.0.insert(scenario.into(), date.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the start date for a scenario.
    ///
    /// Exact match first, then case-insensitive, so an `RCP45` file token
    /// matches an `rcp45` config key. A miss is a fatal configuration error.
    pub fn for_scenario(&self, scenario: &str) -> Result<&str> {
        if let Some(date) = self.0.get(scenario) {
            return Ok(date.as_str());
        }
        let lowered = scenario.to_ascii_lowercase();
        self.0
            .iter()
            .find(|(key, _)| key.to_ascii_lowercase() == lowered)
            .map(|(_, date)| date.as_str())
            .ok_or_else(|| NetunoBatchError::MissingInitialDate(scenario.to_string()))
    }

    pub fn netuno_defaults() -> Self {
        let entries = [
            ("historical", "01/01/1980"),
            ("rcp45", "01/01/2006"),
            ("rcp85", "01/01/2006"),
        ];
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for InitialDates {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Wall-clock waits used by the driver.
///
/// Netuno offers no readiness or completion callback, so both synchronization
/// points are sleeps. Seconds as floats so tests can run with near-zero
/// waits.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverTiming {
    /// Wait after launching Netuno before any automation is attempted.
    #[serde(default = "default_startup_wait_secs")]
    pub startup_wait_secs: f64,

    /// Upper bound on one run's completion wait.
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: f64,

    /// Interval between completion probes.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: f64,
}

fn default_startup_wait_secs() -> f64 {
    5.0
}

fn default_run_timeout_secs() -> f64 {
    600.0
}

fn default_poll_interval_secs() -> f64 {
    0.5
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            startup_wait_secs: default_startup_wait_secs(),
            run_timeout_secs: default_run_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl DriverTiming {
    pub fn startup_wait(&self) -> Duration {
        Duration::from_secs_f64(self.startup_wait_secs)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.run_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(self.poll_interval_secs)
    }
}

/// `[automation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AutomationConfig {
    /// Bridge command invoked once per automation step. See
    /// [`crate::driver::ScriptedAutomation`] for the step contract.
    #[serde(default = "default_bridge_cmd")]
    pub bridge_cmd: String,
}

fn default_bridge_cmd() -> String {
    "netuno-bridge".to_string()
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            bridge_cmd: default_bridge_cmd(),
        }
    }
}

/// Top-level configuration. Read-only for the entire batch.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "SimulationParameters::netuno_defaults")]
    pub parameters: SimulationParameters,

    #[serde(default = "InitialDates::netuno_defaults")]
    pub initial_dates: InitialDates,

    #[serde(default)]
    pub timing: DriverTiming,

    #[serde(default)]
    pub automation: AutomationConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parameters: SimulationParameters::netuno_defaults(),
            initial_dates: InitialDates::netuno_defaults(),
            timing: DriverTiming::default(),
            automation: AutomationConfig::default(),
        }
    }
}
