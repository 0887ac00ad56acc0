// Entrypoint for the updater.
// - Reads the configuration, sets up logging and runs the pipeline once.
// - Stage failures are only logged: the exit code is 0 whatever happens
//   after the configuration was parsed.

use clap::Parser;
use hub_description_updater::{config::Config, pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let outcome = pipeline::run(&config);
    info!("Finished: {:?}", outcome);
}
