//! Run the national parks biodiversity analysis
//!
//! Reads species_info.csv and observations.csv from the working directory,
//! prints the tables and test results, and writes two PNG charts.
//!
//! Usage:
//!   cargo run --release --bin biodiversity_report

use park_biodiversity::config::{AnalysisConfig, DEFAULT_CONFIG_FILE};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "park_biodiversity=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AnalysisConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?;
    let report = park_biodiversity::run(&config)?;

    if !report.chart_failures.is_empty() {
        for failure in &report.chart_failures {
            tracing::error!("{}", failure);
        }
        anyhow::bail!("{} chart(s) could not be written", report.chart_failures.len());
    }

    tracing::info!("Charts written: {:?}", report.charts_written);
    Ok(())
}
