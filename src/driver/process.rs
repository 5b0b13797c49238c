// src/driver/process.rs

//! Lifecycle of the external Netuno process.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::errors::{NetunoBatchError, Result};

/// Handle to the live simulator process. Owned exclusively by the driver.
#[derive(Debug)]
pub struct NetunoProcess {
    child: Child,
}

impl NetunoProcess {
    /// Launch the executable (no arguments, stdio discarded) and wait out the
    /// warm-up interval so the UI is interactive before any automation.
    ///
    /// `kill_on_drop` backs the panic path; normal teardown goes through
    /// [`terminate`](Self::terminate).
    pub async fn launch(exe: &Path, warmup: Duration) -> Result<Self> {
        let mut child = Command::new(exe)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                NetunoBatchError::ProcessLaunch(format!("spawning {:?}: {err}", exe))
            })?;

        info!(pid = child.id(), exe = %exe.display(), "spawned Netuno process");
        sleep(warmup).await;

        if let Some(status) = child
            .try_wait()
            .map_err(|err| NetunoBatchError::ProcessLaunch(err.to_string()))?
        {
            return Err(NetunoBatchError::ProcessLaunch(format!(
                "process exited during warm-up with {status}"
            )));
        }

        Ok(Self { child })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Terminate the process. Safe to call on an already-exited child.
    pub async fn terminate(&mut self) -> Result<()> {
        if let Some(status) = self.child.try_wait()? {
            debug!(%status, "Netuno process already exited");
            return Ok(());
        }

        if let Err(err) = self.child.start_kill() {
            // InvalidInput means the child was already reaped.
            if err.kind() != std::io::ErrorKind::InvalidInput {
                return Err(err.into());
            }
        }
        let status = self.child.wait().await?;
        info!(%status, "terminated Netuno process");
        Ok(())
    }
}
