// src/lib.rs

pub mod batch;
pub mod cli;
pub mod config;
pub mod driver;
pub mod errors;
pub mod export;
pub mod logging;
pub mod meta;
pub mod results;

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::batch::run_batch;
use crate::cli::CliArgs;
use crate::driver::ScriptedAutomation;
use crate::errors::Result;
use crate::export::Exporter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - argument validation
/// - batch configuration (built-in defaults or `--config`)
/// - the exporter, rooted relative to the input directory
/// - the scripted automation backend
/// - the batch loop, with a summary logged at the end
pub async fn run(args: CliArgs) -> Result<()> {
    if let Err(err) = args.validate() {
        error!(error = %err, "command line argument validation failed");
        return Err(err);
    }

    let config = config::load_or_default(args.config.as_deref())?;
    let exporter = Exporter::new(export_root_for(&args.precipitation_dir_path));
    let automation = ScriptedAutomation::new(&config.automation);

    let summary = run_batch(
        &args.netuno_exe_path,
        &args.precipitation_dir_path,
        &config,
        automation,
        &exporter,
    )
    .await?;

    info!(
        total_s = summary.total.as_secs_f64(),
        first_run_s = summary.first_run.as_secs_f64(),
        "completed all simulations"
    );
    match summary.mean_subsequent() {
        Some(mean) => info!(
            mean_s = mean.as_secs_f64(),
            runs = summary.subsequent_runs.len(),
            "average time per subsequent iteration"
        ),
        None => info!("no subsequent iterations to average"),
    }

    Ok(())
}

/// Results land next to the input data: the precipitation directory's
/// grandparent, with city/model/scenario underneath.
fn export_root_for(precipitation_dir: &Path) -> PathBuf {
    precipitation_dir
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
