//! Reference-data validation CLI.
//!
//! Loads the configured datasets, runs one directory build, and reports what
//! a service start would produce. Useful after refreshing the upstream YAML
//! files to spot records that would be dropped.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use clap::Parser;
use watchdog_api::{
    config::Config,
    congress::{CongressDirectory, ReferenceData},
};

#[derive(Parser)]
#[command(name = "validate_data", about = "Build the directory once and report counts")]
struct Args {
    /// Configuration file holding the dataset paths
    #[arg(long, default_value = "config.yaml")]
    config: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt::init();

    let config = Config::load_from(&args.config).map_err(|e| anyhow::anyhow!("{e}"))?;
    let data = ReferenceData::load(&config.datasets);
    let directory = CongressDirectory::build(&data);

    let stats = directory.stats();
    tracing::info!(
        representatives = stats.representatives,
        senators = stats.senators,
        committees = directory.committees().len(),
        skipped = stats.skipped,
        load_failures = stats.load_failures,
        "directory build finished"
    );
    for (reason, count) in &stats.skip_reasons {
        tracing::warn!(reason, count, "records skipped");
    }

    if stats.load_failures > 0 {
        anyhow::bail!("{} reference file(s) failed to load", stats.load_failures);
    }
    Ok(())
}
