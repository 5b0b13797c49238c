use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use netuno_batch::config::SimulationParameters;
use netuno_batch::driver::{Automation, AutomationStep};
use netuno_batch::errors::NetunoBatchError;

/// A deterministic automation double.
///
/// - records every protocol step it is asked to perform
/// - simulates run completion after a configurable number of polls
/// - can inject failures at specific steps
///
/// No process or UI interaction of any kind.
#[derive(Debug)]
pub struct FakeAutomation {
    log: Arc<Mutex<Vec<String>>>,
    output: PathBuf,
    polls_until_complete: usize,
    polls_remaining: usize,
    fail_apply_parameters: bool,
    fail_load_input_at: Option<usize>,
    load_input_calls: usize,
}

impl FakeAutomation {
    /// A fake whose runs complete on the first completion probe, reporting
    /// `output` as the artifact path.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            output: output.into(),
            polls_until_complete: 0,
            polls_remaining: 0,
            fail_apply_parameters: false,
            fail_load_input_at: None,
            load_input_calls: 0,
        }
    }

    /// Complete each run only after `polls` completion probes.
    pub fn completing_after_polls(mut self, polls: usize) -> Self {
        self.polls_until_complete = polls;
        self
    }

    /// Never signal completion; runs can only end in a timeout.
    pub fn never_completing(mut self) -> Self {
        self.polls_until_complete = usize::MAX;
        self
    }

    /// Fail the parameter-application step of the first run.
    pub fn failing_apply_parameters(mut self) -> Self {
        self.fail_apply_parameters = true;
        self
    }

    /// Fail the `nth` (1-based) input-file load.
    pub fn failing_load_input_at(mut self, nth: usize) -> Self {
        self.fail_load_input_at = Some(nth);
        self
    }

    /// Shared handle to the recorded step log.
    pub fn log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.log)
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }

    fn injected(step: &str) -> NetunoBatchError {
        NetunoBatchError::Automation {
            step: step.to_string(),
            reason: "injected failure".to_string(),
        }
    }
}

impl Automation for FakeAutomation {
    fn apply_parameters<'a>(
        &'a mut self,
        parameters: &'a SimulationParameters,
    ) -> AutomationStep<'a, ()> {
        Box::pin(async move {
            self.record(format!("apply_parameters:{}", parameters.len()));
            if self.fail_apply_parameters {
                return Err(Self::injected("apply-parameters"));
            }
            Ok(())
        })
    }

    fn load_input_file<'a>(&'a mut self, path: &'a Path) -> AutomationStep<'a, ()> {
        Box::pin(async move {
            self.load_input_calls += 1;
            self.record(format!("load_input:{}", path.display()));
            if self.fail_load_input_at == Some(self.load_input_calls) {
                return Err(Self::injected("load-input"));
            }
            Ok(())
        })
    }

    fn set_start_date<'a>(&'a mut self, date: &'a str) -> AutomationStep<'a, ()> {
        Box::pin(async move {
            self.record(format!("set_start_date:{date}"));
            Ok(())
        })
    }

    fn start_run(&mut self) -> AutomationStep<'_, PathBuf> {
        Box::pin(async move {
            self.record("start_run");
            self.polls_remaining = self.polls_until_complete;
            Ok(self.output.clone())
        })
    }

    fn run_finished<'a>(&'a mut self, _output: &'a Path) -> AutomationStep<'a, bool> {
        Box::pin(async move {
            if self.polls_remaining == 0 {
                return Ok(true);
            }
            if self.polls_remaining != usize::MAX {
                self.polls_remaining -= 1;
            }
            Ok(false)
        })
    }
}
