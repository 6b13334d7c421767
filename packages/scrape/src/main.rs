#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the launch listing scrape.
//!
//! With no flags this crawls the built-in listing into
//! `space_launches.csv`, resuming after the page named in `last_page.txt`.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use launch_report_cli_utils::IndicatifProgress;
use launch_report_scrape::RunOutcome;
use launch_report_scrape::config::SiteConfig;
use launch_report_scrape::driver::ScrapeDriver;
use launch_report_scraper::fetcher::LaunchPageFetcher;

#[derive(Parser)]
#[command(name = "launch_scrape", about = "Scrape the launch listing into a CSV file")]
struct Cli {
    /// Site configuration TOML replacing the built-in one
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = launch_report_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            log::info!("Loading site configuration from {}", path.display());
            SiteConfig::from_path(path)?
        }
        None => SiteConfig::embedded()?,
    };

    let fetcher =
        LaunchPageFetcher::new(config.scrape_config())?.with_extractor(config.extractor()?);
    let driver = ScrapeDriver::new(
        fetcher,
        config.csv_sink(),
        config.checkpoint_store(),
        config.pages(),
    );

    let start = Instant::now();
    let progress = IndicatifProgress::pages_bar(&multi, "Reading checkpoint");
    let report = driver.run(progress).await;
    let elapsed = start.elapsed();

    log::info!(
        "Examined {} pages ({} empty), wrote {} launches from {} pages in {:.1}s",
        report.pages_examined,
        report.empty_pages,
        report.records_written,
        report.pages_persisted,
        elapsed.as_secs_f64()
    );

    match report.outcome {
        RunOutcome::Done => Ok(()),
        RunOutcome::Aborted { page, error } => {
            if let Some(last) = report.last_completed {
                log::error!("Run stopped at page {page}; rerun to resume after page {last}");
            } else {
                log::error!("Run stopped at page {page}");
            }
            Err(error.into())
        }
    }
}
