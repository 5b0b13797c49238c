// src/main.rs

use netuno_batch::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("netuno-batch error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.quiet, args.verbose)?;
    run(args).await.map_err(anyhow::Error::from)
}
