//! CLI entry point for median-cut palette training and Markov image generation

use chromarkov::io::cli::{Cli, Pipeline};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> chromarkov::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut pipeline = Pipeline::new(cli);
    pipeline.process()?;
    Ok(())
}
