// src/batch.rs

//! Batch orchestration.
//!
//! Iterates the precipitation files in lexicographic name order, runs the
//! first through full configuration and every other file through the light
//! path, parses and exports each result, and terminates the simulator on
//! every exit path. Strictly sequential: one file's full cycle completes
//! before the next begins.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use globset::GlobBuilder;
use tracing::{error, info};

use crate::config::{BatchConfig, SimulationParameters};
use crate::driver::{Automation, NetunoDriver};
use crate::errors::{NetunoBatchError, Result};
use crate::export::Exporter;
use crate::meta::InputFile;
use crate::results::parse_results;

/// Wall-clock accounting for one batch.
///
/// The first iteration is tracked separately: its cost profile includes the
/// full parameter configuration, so folding it into the mean would skew it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub first_run: Duration,
    pub subsequent_runs: Vec<Duration>,
    pub total: Duration,
}

impl BatchSummary {
    /// Mean duration over the non-first iterations; `None` for a
    /// single-file batch.
    pub fn mean_subsequent(&self) -> Option<Duration> {
        if self.subsequent_runs.is_empty() {
            return None;
        }
        let total: Duration = self.subsequent_runs.iter().sum();
        Some(total / self.subsequent_runs.len() as u32)
    }
}

/// List the CSV files (case-insensitive extension) in `dir`, sorted
/// lexicographically by name so the choice of "first run" file is stable
/// across platforms and filesystems.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new("*.csv")
        .case_insensitive(true)
        .build()
        .map_err(anyhow::Error::from)?
        .compile_matcher();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if path.is_file() && matcher.is_match(name) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run the whole batch. The driver session is started after the input set is
/// known to be non-empty, and stopped exactly once on every exit path.
pub async fn run_batch<A: Automation>(
    netuno_exe: &Path,
    precipitation_dir: &Path,
    config: &BatchConfig,
    automation: A,
    exporter: &Exporter,
) -> Result<BatchSummary> {
    let files = list_input_files(precipitation_dir)?;
    // Emptiness is checked before launch so a bad input directory never
    // leaves a stray simulator process behind.
    let Some((first_file, rest)) = files.split_first() else {
        return Err(NetunoBatchError::MissingInputData(
            precipitation_dir.to_path_buf(),
        ));
    };
    info!(
        count = files.len(),
        dir = %precipitation_dir.display(),
        export_root = %exporter.root().display(),
        "starting batch"
    );

    let mut driver = NetunoDriver::start(netuno_exe, automation, config.timing.clone()).await?;
    let outcome = drive_files(&mut driver, first_file, rest, config, exporter).await;
    let stop_outcome = driver.stop().await;

    match (outcome, stop_outcome) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(stop_err)) => Err(stop_err),
        (Err(run_err), Ok(())) => Err(run_err),
        (Err(run_err), Err(stop_err)) => {
            error!(error = %stop_err, "also failed to terminate Netuno while aborting");
            Err(run_err)
        }
    }
}

async fn drive_files<A: Automation>(
    driver: &mut NetunoDriver<A>,
    first_file: &Path,
    rest: &[PathBuf],
    config: &BatchConfig,
    exporter: &Exporter,
) -> Result<BatchSummary> {
    let batch_started = Instant::now();

    let first_run = run_one(driver, first_file, config, exporter, Some(&config.parameters))
        .await
        .inspect_err(|err| {
            error!(file = %first_file.display(), error = %err, "batch aborted during first simulation");
        })?;

    let mut subsequent_runs = Vec::with_capacity(rest.len());
    for path in rest {
        let elapsed = run_one(driver, path, config, exporter, None)
            .await
            .inspect_err(|err| {
                error!(file = %path.display(), error = %err, "batch aborted");
            })?;
        subsequent_runs.push(elapsed);
    }

    Ok(BatchSummary {
        first_run,
        subsequent_runs,
        total: batch_started.elapsed(),
    })
}

/// One file's full cycle: metadata → run → parse → export.
///
/// `parameters` is `Some` only for the first file of the batch, which goes
/// through the driver's full-configuration path.
async fn run_one<A: Automation>(
    driver: &mut NetunoDriver<A>,
    path: &Path,
    config: &BatchConfig,
    exporter: &Exporter,
    parameters: Option<&SimulationParameters>,
) -> Result<Duration> {
    let started = Instant::now();

    let file = InputFile::from_path(path)?;
    let start_date = config.initial_dates.for_scenario(&file.scenario)?;

    let result = match parameters {
        Some(parameters) => driver.run_first(&file, start_date, parameters).await?,
        None => driver.run_simulation(&file, start_date).await?,
    };

    let records = parse_results(result.path())?;
    exporter.save_results(&file.city, &file.model, &file.scenario, &records)?;

    let elapsed = started.elapsed();
    match parameters {
        Some(_) => info!(
            city = %file.city,
            model = %file.model,
            scenario = %file.scenario,
            elapsed_s = elapsed.as_secs_f64(),
            "finished configuration and first simulation"
        ),
        None => info!(
            city = %file.city,
            model = %file.model,
            scenario = %file.scenario,
            elapsed_s = elapsed.as_secs_f64(),
            "finished simulation"
        ),
    }
    Ok(elapsed)
}
