use std::process::ExitCode;

use clap::Parser;
use obj_reproject::{rewrite_file, Cli, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn run() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    rewrite_file(&config)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
