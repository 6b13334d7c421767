//! The page loop.
//!
//! Each page goes through fetch, extract, persist and checkpoint in that
//! order. The checkpoint only moves after the page's rows are synced to
//! the sink, so a crash replays at most one page.

use std::ops::RangeInclusive;
use std::sync::Arc;

use launch_report_scraper::progress::ProgressCallback;
use launch_report_scraper::{PageOutcome, Scraper};
use launch_report_store::checkpoint::CheckpointStore;
use launch_report_store::csv_sink::{CsvSink, WriteMode};

use crate::{DriverError, RunOutcome, ScrapeReport, StartPoint};

/// Drives a [`Scraper`] over a page range into a [`CsvSink`].
pub struct ScrapeDriver<S: Scraper> {
    scraper: S,
    sink: CsvSink,
    checkpoint: CheckpointStore,
    pages: RangeInclusive<u32>,
}

impl<S: Scraper> ScrapeDriver<S> {
    /// Creates a driver crawling `pages`.
    #[must_use]
    pub const fn new(
        scraper: S,
        sink: CsvSink,
        checkpoint: CheckpointStore,
        pages: RangeInclusive<u32>,
    ) -> Self {
        Self {
            scraper,
            sink,
            checkpoint,
            pages,
        }
    }

    /// Reads the checkpoint to decide where this run begins.
    #[must_use]
    pub fn start_point(&self) -> StartPoint {
        StartPoint::from_checkpoint(self.checkpoint.load())
    }

    /// Runs the crawl to completion or to the first fatal error.
    ///
    /// Pages that fail to fetch, have no table, or cannot be written to the
    /// sink are logged and skipped without moving the checkpoint. A scraper
    /// error or a checkpoint write failure stops the run; the checkpoint
    /// then still names the last page that completed.
    pub async fn run(&self, progress: Arc<dyn ProgressCallback>) -> ScrapeReport {
        let start = self.start_point();
        let first = start.first_page(*self.pages.start());
        let last = *self.pages.end();

        match start {
            StartPoint::Fresh => log::info!("No checkpoint found; starting at page {first}"),
            StartPoint::Resuming { last_completed } => {
                log::info!("Resuming from page {first} (page {last_completed} completed)");
            }
        }

        let mut report = ScrapeReport::new(start);

        if first > last {
            log::info!("Nothing to scrape: page {first} is past the last page {last}");
            progress.finish("Nothing to scrape".to_string());
            return report;
        }

        progress.set_total(u64::from(last - first + 1));

        for page in first..=last {
            progress.set_message(format!("Page {page}/{last}"));
            log::info!("Scraping page {page} ({})", self.scraper.strategy());

            if let Err(error) = self.process_page(page, first, &mut report).await {
                log::error!("Stopping at page {page}: {error}");
                progress.finish(format!("Stopped at page {page}"));
                report.outcome = RunOutcome::Aborted { page, error };
                return report;
            }

            progress.inc(1);
        }

        log::info!("Scraping completed!");
        progress.finish(format!(
            "Scraped {} launches from {} pages",
            report.records_written, report.pages_persisted
        ));
        report
    }

    async fn process_page(
        &self,
        page: u32,
        first: u32,
        report: &mut ScrapeReport,
    ) -> Result<(), DriverError> {
        let scraped = self.scraper.fetch_page(page).await?;
        report.pages_examined += 1;

        if scraped.records.is_empty() {
            report.empty_pages += 1;
            match scraped.outcome {
                PageOutcome::FetchFailed => {
                    log::warn!("Page {page} could not be fetched; checkpoint not advanced");
                }
                PageOutcome::NoTable | PageOutcome::Extracted => {
                    log::warn!("No launches found on page {page} ({})", scraped.outcome);
                }
            }
            return Ok(());
        }

        log::info!("Found {} launches on page {page}", scraped.records.len());

        let mode = if page == first {
            WriteMode::Overwrite
        } else {
            WriteMode::Append
        };

        match self.sink.write(&scraped.records, mode) {
            Ok(written) => {
                report.records_written += u64::try_from(written).unwrap_or(u64::MAX);
                report.pages_persisted += 1;
            }
            Err(e) => {
                log::error!(
                    "Error saving page {page} to {}: {e}",
                    self.sink.path().display()
                );
                return Ok(());
            }
        }

        self.checkpoint
            .save(page)
            .map_err(|source| DriverError::Checkpoint { page, source })?;
        report.last_completed = Some(page);

        Ok(())
    }
}
