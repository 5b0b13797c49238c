// src/driver/scripted.rs

//! Production automation backend.
//!
//! Delegates each protocol step to an external bridge command (typically a
//! small AutoIt/pywinauto helper that owns the actual window and widget
//! handling). The bridge contract, one invocation per step:
//!
//! ```text
//! <bridge> apply-param <name> <value>
//! <bridge> load-input <path>
//! <bridge> set-start-date <dd/mm/yyyy>
//! <bridge> start-run          # prints the output artifact path on stdout
//! ```
//!
//! A non-zero exit status fails the step. Completion is observed by polling
//! for the artifact on disk: Netuno writes its export in one pass, so an
//! existing non-empty file means the run is done.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::{AutomationConfig, SimulationParameters};
use crate::driver::automation::{Automation, AutomationStep};
use crate::errors::{NetunoBatchError, Result};

pub struct ScriptedAutomation {
    bridge_cmd: String,
}

impl ScriptedAutomation {
    pub fn new(config: &AutomationConfig) -> Self {
        Self {
            bridge_cmd: config.bridge_cmd.clone(),
        }
    }

    async fn invoke(&self, args: &[&str]) -> Result<String> {
        let step = args.first().copied().unwrap_or("bridge");
        debug!(bridge = %self.bridge_cmd, ?args, "invoking automation bridge");

        let output = Command::new(&self.bridge_cmd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| NetunoBatchError::Automation {
                step: step.to_string(),
                reason: format!("spawning bridge '{}': {err}", self.bridge_cmd),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NetunoBatchError::Automation {
                step: step.to_string(),
                reason: format!(
                    "bridge exited with {}: {}",
                    output.status,
                    stderr.trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Automation for ScriptedAutomation {
    fn apply_parameters<'a>(
        &'a mut self,
        parameters: &'a SimulationParameters,
    ) -> AutomationStep<'a, ()> {
        Box::pin(async move {
            for (name, value) in parameters.entries() {
                self.invoke(&["apply-param", name, value]).await?;
            }
            Ok(())
        })
    }

    fn load_input_file<'a>(&'a mut self, path: &'a Path) -> AutomationStep<'a, ()> {
        Box::pin(async move {
            let path = path.to_string_lossy();
            self.invoke(&["load-input", &path]).await?;
            Ok(())
        })
    }

    fn set_start_date<'a>(&'a mut self, date: &'a str) -> AutomationStep<'a, ()> {
        Box::pin(async move {
            self.invoke(&["set-start-date", date]).await?;
            Ok(())
        })
    }

    fn start_run(&mut self) -> AutomationStep<'_, PathBuf> {
        Box::pin(async move {
            let reported = self.invoke(&["start-run"]).await?;
            if reported.is_empty() {
                return Err(NetunoBatchError::Automation {
                    step: "start-run".to_string(),
                    reason: "bridge did not report an output artifact path".to_string(),
                });
            }
            Ok(PathBuf::from(reported))
        })
    }

    fn run_finished<'a>(&'a mut self, output: &'a Path) -> AutomationStep<'a, bool> {
        Box::pin(async move {
            match tokio::fs::metadata(output).await {
                Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
                Err(_) => Ok(false),
            }
        })
    }
}
