// src/driver/automation.rs

//! Pluggable automation capability for driving the Netuno UI.
//!
//! The driver talks to an [`Automation`] impl instead of a concrete GUI
//! mechanism. This pins down the *protocol* — which operations, in what
//! order — while keeping window and widget handling swappable.
//!
//! - [`ScriptedAutomation`](super::ScriptedAutomation) is the production
//!   implementation; it delegates each step to an external bridge command.
//! - Tests provide their own `Automation` that records the protocol and
//!   simulates completion and failures deterministically.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::config::SimulationParameters;
use crate::errors::Result;

/// One automation step as a boxed future, so the trait stays object-safe and
/// doubles don't need an async runtime of their own.
pub type AutomationStep<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

pub trait Automation: Send {
    /// Fill in every named simulation parameter. Performed once per session,
    /// by the first run only.
    fn apply_parameters<'a>(
        &'a mut self,
        parameters: &'a SimulationParameters,
    ) -> AutomationStep<'a, ()>;

    /// Point the simulator at a precipitation input file.
    fn load_input_file<'a>(&'a mut self, path: &'a Path) -> AutomationStep<'a, ()>;

    /// Set the simulation start date (`dd/mm/yyyy`).
    fn set_start_date<'a>(&'a mut self, date: &'a str) -> AutomationStep<'a, ()>;

    /// Trigger execution. Returns the path where the simulator will write
    /// its results artifact.
    fn start_run(&mut self) -> AutomationStep<'_, PathBuf>;

    /// Probe whether the run that produces `output` has finished. The driver
    /// polls this under its bounded completion wait.
    fn run_finished<'a>(&'a mut self, output: &'a Path) -> AutomationStep<'a, bool>;
}
