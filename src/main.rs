#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use cryptobrain::Config;
use cryptobrain::app::dispatch::dispatch;
use cryptobrain::app::logging;
use cryptobrain::cli::Cli;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = logging::with_startup_logging(cli.verbose, Config::load_or_init)?;

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.observability.level()
    };
    if let Err(e) = tracing::subscriber::set_global_default(logging::subscriber(level)) {
        eprintln!("Warning: failed to install log subscriber: {e}");
    }

    dispatch(cli, config).await
}
