#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the launch workbook report.

use std::path::PathBuf;

use clap::Parser;
use launch_report_report::{DEFAULT_REPORT_PATH, generate_report};
use launch_report_store::DEFAULT_CSV_PATH;

#[derive(Parser)]
#[command(name = "launch_report", about = "Build the launch statistics workbook")]
struct Cli {
    /// Launch table written by `launch_scrape`
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    input: PathBuf,
    /// Workbook to write
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _multi = launch_report_cli_utils::init_logger();
    let cli = Cli::parse();

    log::info!(
        "Building {} from {}",
        cli.output.display(),
        cli.input.display()
    );
    let summary = generate_report(&cli.input, &cli.output)?;

    log::info!("Analysis Summary:\n{summary}");
    Ok(())
}
