// src/driver/mod.rs

//! Netuno driver: owns the external simulator process and presents a
//! two-phase run contract that hides process and UI synchronization from the
//! batch loop.
//!
//! A session moves `Unconfigured → Configured → Stopped`. [`run_first`]
//! is the only way out of `Unconfigured`: it applies the full parameter set
//! before running. Every later file goes through [`run_simulation`], which
//! reuses the applied parameters and only swaps input file and start date.
//!
//! [`run_first`]: NetunoDriver::run_first
//! [`run_simulation`]: NetunoDriver::run_simulation

pub mod automation;
pub mod process;
pub mod scripted;

use std::path::{Path, PathBuf};

use tokio::time::{Instant, sleep};
use tracing::{debug, info};

pub use automation::{Automation, AutomationStep};
pub use scripted::ScriptedAutomation;

use crate::config::{DriverTiming, SimulationParameters};
use crate::errors::{NetunoBatchError, Result};
use crate::meta::InputFile;
use process::NetunoProcess;

/// Where the driver is in its session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    /// Process is up; simulation parameters not applied yet.
    Unconfigured,
    /// Parameters applied; ready for subsequent runs.
    Configured,
    /// Process terminated; no further runs.
    Stopped,
}

/// Opaque handle to one finished run's output artifact. Consumed by
/// [`crate::results::parse_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    output: PathBuf,
}

impl RunResult {
    pub fn path(&self) -> &Path {
        &self.output
    }
}

#[derive(Debug)]
pub struct NetunoDriver<A: Automation> {
    process: NetunoProcess,
    automation: A,
    timing: DriverTiming,
    state: DriverState,
}

impl<A: Automation> NetunoDriver<A> {
    /// Launch the simulator and wait out the configured warm-up interval.
    pub async fn start(exe: &Path, automation: A, timing: DriverTiming) -> Result<Self> {
        let process = NetunoProcess::launch(exe, timing.startup_wait()).await?;
        Ok(Self {
            process,
            automation,
            timing,
            state: DriverState::Unconfigured,
        })
    }

    pub fn process_id(&self) -> Option<u32> {
        self.process.id()
    }

    /// First run of a session: applies every simulation parameter, then the
    /// shared configure-trigger-wait path.
    ///
    /// Once the parameters are applied the session counts as configured,
    /// even if the run itself then fails.
    pub async fn run_first(
        &mut self,
        file: &InputFile,
        start_date: &str,
        parameters: &SimulationParameters,
    ) -> Result<RunResult> {
        self.require_state(DriverState::Unconfigured, "run_first")?;
        debug!(count = parameters.len(), "applying simulation parameters");
        self.automation.apply_parameters(parameters).await?;
        self.state = DriverState::Configured;
        self.execute(file, start_date).await
    }

    /// Subsequent run: reuses the session's applied parameters; only input
    /// file and start date change.
    pub async fn run_simulation(&mut self, file: &InputFile, start_date: &str) -> Result<RunResult> {
        self.require_state(DriverState::Configured, "run_simulation")?;
        self.execute(file, start_date).await
    }

    /// Request termination of the simulator process. Idempotent: later calls
    /// and calls after the process already died are no-ops.
    pub async fn stop(&mut self) -> Result<()> {
        if self.state == DriverState::Stopped {
            return Ok(());
        }
        self.state = DriverState::Stopped;
        self.process.terminate().await
    }

    async fn execute(&mut self, file: &InputFile, start_date: &str) -> Result<RunResult> {
        debug!(file = %file.path.display(), start_date, "configuring run");
        self.automation.load_input_file(&file.path).await?;
        self.automation.set_start_date(start_date).await?;
        let output = self.automation.start_run().await?;
        info!(file = %file.path.display(), output = %output.display(), "simulation started");
        self.wait_for_completion(&output).await?;
        Ok(RunResult { output })
    }

    /// Bounded wall-clock wait for the completion signal. The simulator has
    /// no completion callback, so this polls the automation backend.
    async fn wait_for_completion(&mut self, output: &Path) -> Result<()> {
        let deadline = Instant::now() + self.timing.run_timeout();
        loop {
            if self.automation.run_finished(output).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(NetunoBatchError::SimulationTimeout(self.timing.run_timeout()));
            }
            sleep(self.timing.poll_interval()).await;
        }
    }

    fn require_state(&self, want: DriverState, operation: &'static str) -> Result<()> {
        if self.state == want {
            return Ok(());
        }
        let reason = match self.state {
            DriverState::Unconfigured => "the session is not configured yet; run_first must run before any run_simulation",
            DriverState::Configured => "the session is already configured; run_first is a one-shot operation",
            DriverState::Stopped => "the session is stopped",
        };
        Err(NetunoBatchError::InvalidDriverState { operation, reason })
    }
}
