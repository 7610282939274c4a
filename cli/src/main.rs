mod arg_parser;
mod error;
mod registry;
mod runner;
mod scenario;
mod settings;

use arg_parser::ArgParser;
use joblib::JobDispatcher;
use settings::Settings;

use clap::Parser;
use std::{io, process};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ArgParser::parse();
    if args.is_empty() {
        ArgParser::write_usage(&mut io::stderr())?;
        process::exit(1);
    }

    let settings = Settings::from(&args);
    let dispatcher = match args.jobs {
        Some(jobs) => JobDispatcher::spawn(jobs),
        None => JobDispatcher::with_available_parallelism(),
    };
    log::debug!("running with {} workers", dispatcher.worker_count());

    let registry = registry::scenarios();
    let result = runner::execute(runner::plan(&registry, &args), &dispatcher, &settings).await;

    // whatever happened above, let running simulations finish before exiting
    if let Err(e) = dispatcher.drain().await {
        log::error!("failed to drain job dispatcher: {}", e);
    }
    if let Err(e) = dispatcher.shutdown().await {
        log::error!("failed to shut down job dispatcher: {}", e);
    }

    result?;
    log::info!(">>> FINISHED <<<");
    Ok(())
}
