// tests/driver_state_machine.rs

//! Session state-machine behaviour of the driver, exercised with a fake
//! automation backend and short-lived stand-in processes.

use std::path::Path;

use netuno_batch::config::{DriverTiming, SimulationParameters};
use netuno_batch::driver::NetunoDriver;
use netuno_batch::errors::NetunoBatchError;
use netuno_batch::meta::InputFile;
use netuno_batch_test_utils::{FakeAutomation, init_tracing};

/// `yes` takes no arguments and runs until killed; its stdout is discarded
/// by the driver, so it makes a convenient stand-in for the simulator.
const IDLE_EXE: &str = "yes";

fn fast_timing() -> DriverTiming {
    DriverTiming {
        startup_wait_secs: 0.01,
        run_timeout_secs: 2.0,
        poll_interval_secs: 0.001,
    }
}

fn input_file() -> InputFile {
    InputFile::from_path(Path::new("CityA_ModelX_rcp45.csv")).unwrap()
}

fn parameters() -> SimulationParameters {
    let mut parameters = SimulationParameters::new();
    parameters.insert("catchment_area_m2", "100");
    parameters
}

#[tokio::test]
async fn run_simulation_before_run_first_is_rejected_without_any_automation() {
    init_tracing();

    let fake = FakeAutomation::new("out.csv");
    let log = fake.log();
    let mut driver = NetunoDriver::start(Path::new(IDLE_EXE), fake, fast_timing())
        .await
        .unwrap();

    let err = driver
        .run_simulation(&input_file(), "01/01/2006")
        .await
        .unwrap_err();

    assert!(matches!(err, NetunoBatchError::InvalidDriverState { .. }));
    assert!(
        log.lock().unwrap().is_empty(),
        "no automation step may run on a state violation"
    );

    driver.stop().await.unwrap();
}

#[tokio::test]
async fn run_first_is_a_one_shot_operation() {
    init_tracing();

    let fake = FakeAutomation::new("out.csv");
    let mut driver = NetunoDriver::start(Path::new(IDLE_EXE), fake, fast_timing())
        .await
        .unwrap();

    driver
        .run_first(&input_file(), "01/01/2006", &parameters())
        .await
        .unwrap();

    let err = driver
        .run_first(&input_file(), "01/01/2006", &parameters())
        .await
        .unwrap_err();
    assert!(matches!(err, NetunoBatchError::InvalidDriverState { .. }));

    driver.stop().await.unwrap();
}

#[tokio::test]
async fn configured_session_allows_repeated_runs() {
    init_tracing();

    let fake = FakeAutomation::new("out.csv");
    let log = fake.log();
    let mut driver = NetunoDriver::start(Path::new(IDLE_EXE), fake, fast_timing())
        .await
        .unwrap();

    driver
        .run_first(&input_file(), "01/01/2006", &parameters())
        .await
        .unwrap();
    driver
        .run_simulation(&input_file(), "01/01/2006")
        .await
        .unwrap();
    driver
        .run_simulation(&input_file(), "01/01/2006")
        .await
        .unwrap();

    let log = log.lock().unwrap();
    assert_eq!(
        log.iter()
            .filter(|entry| entry.starts_with("apply_parameters"))
            .count(),
        1,
        "parameters are applied exactly once per session"
    );
    assert_eq!(
        log.iter().filter(|entry| *entry == "start_run").count(),
        3
    );

    drop(log);
    driver.stop().await.unwrap();
}

#[tokio::test]
async fn stop_is_idempotent() {
    init_tracing();

    let fake = FakeAutomation::new("out.csv");
    let mut driver = NetunoDriver::start(Path::new(IDLE_EXE), fake, fast_timing())
        .await
        .unwrap();

    driver.stop().await.unwrap();
    driver.stop().await.unwrap();
}

#[tokio::test]
async fn runs_after_stop_are_rejected() {
    init_tracing();

    let fake = FakeAutomation::new("out.csv");
    let mut driver = NetunoDriver::start(Path::new(IDLE_EXE), fake, fast_timing())
        .await
        .unwrap();
    driver.stop().await.unwrap();

    let err = driver
        .run_first(&input_file(), "01/01/2006", &parameters())
        .await
        .unwrap_err();
    assert!(matches!(err, NetunoBatchError::InvalidDriverState { .. }));
}

#[tokio::test]
async fn launch_fails_for_a_missing_executable() {
    init_tracing();

    let err = NetunoDriver::start(
        Path::new("/nonexistent/netuno.exe"),
        FakeAutomation::new("out.csv"),
        fast_timing(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, NetunoBatchError::ProcessLaunch(_)));
}

#[tokio::test]
async fn launch_fails_when_the_process_exits_during_warmup() {
    init_tracing();

    // `true` exits immediately, well inside the warm-up window.
    let timing = DriverTiming {
        startup_wait_secs: 0.05,
        ..fast_timing()
    };
    let err = NetunoDriver::start(Path::new("true"), FakeAutomation::new("out.csv"), timing)
        .await
        .unwrap_err();

    assert!(matches!(err, NetunoBatchError::ProcessLaunch(_)));
}

#[tokio::test]
async fn a_run_that_never_completes_times_out() {
    init_tracing();

    let fake = FakeAutomation::new("out.csv").never_completing();
    let timing = DriverTiming {
        startup_wait_secs: 0.01,
        run_timeout_secs: 0.05,
        poll_interval_secs: 0.005,
    };
    let mut driver = NetunoDriver::start(Path::new(IDLE_EXE), fake, timing)
        .await
        .unwrap();

    let err = driver
        .run_first(&input_file(), "01/01/2006", &parameters())
        .await
        .unwrap_err();
    assert!(matches!(err, NetunoBatchError::SimulationTimeout(_)));

    driver.stop().await.unwrap();
}

#[tokio::test]
async fn completion_can_take_several_polls() {
    init_tracing();

    let fake = FakeAutomation::new("out.csv").completing_after_polls(3);
    let mut driver = NetunoDriver::start(Path::new(IDLE_EXE), fake, fast_timing())
        .await
        .unwrap();

    driver
        .run_first(&input_file(), "01/01/2006", &parameters())
        .await
        .unwrap();

    driver.stop().await.unwrap();
}
