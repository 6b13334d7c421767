#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Resumable scrape of the launch listing.
//!
//! [`driver::ScrapeDriver`] walks the listing one page at a time, writes
//! each page's records to the CSV sink and then records the page in the
//! checkpoint. A restarted run picks up after the last recorded page.
//! [`config::SiteConfig`] describes which site to crawl and where the
//! results go.

pub mod config;
pub mod driver;

use launch_report_scraper::ScrapeError;
use launch_report_store::StoreError;

/// Errors that stop a scrape run.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The scraper failed in a way that is not local to one page.
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// The checkpoint could not be written after a page was persisted.
    #[error("Failed to checkpoint page {page}: {source}")]
    Checkpoint {
        /// Page whose records were already written.
        page: u32,
        /// Underlying storage error.
        source: StoreError,
    },
}

/// Where a run begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPoint {
    /// No usable checkpoint; crawl from the first page.
    Fresh,
    /// A previous run completed `last_completed`.
    Resuming {
        /// Last page whose records reached the sink.
        last_completed: u32,
    },
}

impl StartPoint {
    /// Interprets a loaded checkpoint.
    #[must_use]
    pub const fn from_checkpoint(checkpoint: Option<u32>) -> Self {
        match checkpoint {
            Some(last_completed) => Self::Resuming { last_completed },
            None => Self::Fresh,
        }
    }

    /// First page to fetch given the listing's first page.
    #[must_use]
    pub const fn first_page(self, listing_first: u32) -> u32 {
        match self {
            Self::Fresh => listing_first,
            Self::Resuming { last_completed } => {
                let next = last_completed.saturating_add(1);
                if next > listing_first {
                    next
                } else {
                    listing_first
                }
            }
        }
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every page in range was examined.
    Done,
    /// The run stopped early.
    Aborted {
        /// Page being processed when the run stopped.
        page: u32,
        /// What went wrong.
        error: DriverError,
    },
}

/// Summary of one scrape run.
#[derive(Debug)]
pub struct ScrapeReport {
    /// Where the run began.
    pub start: StartPoint,
    /// Pages fetched, including empty and failed ones.
    pub pages_examined: u64,
    /// Pages whose records were written and checkpointed.
    pub pages_persisted: u64,
    /// Pages that produced no records.
    pub empty_pages: u64,
    /// Rows appended to the sink.
    pub records_written: u64,
    /// Last page recorded in the checkpoint during this run.
    pub last_completed: Option<u32>,
    /// How the run ended.
    pub outcome: RunOutcome,
}

impl ScrapeReport {
    /// An empty report for a run beginning at `start`.
    #[must_use]
    pub const fn new(start: StartPoint) -> Self {
        Self {
            start,
            pages_examined: 0,
            pages_persisted: 0,
            empty_pages: 0,
            records_written: 0,
            last_completed: None,
            outcome: RunOutcome::Done,
        }
    }

    /// Whether the run reached the end of the page range.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.outcome, RunOutcome::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_checkpoint_is_fresh_start_at_first_page() {
        let start = StartPoint::from_checkpoint(None);
        assert_eq!(start, StartPoint::Fresh);
        assert_eq!(start.first_page(1), 1);
    }

    #[test]
    fn checkpoint_resumes_at_next_page() {
        let start = StartPoint::from_checkpoint(Some(41));
        assert_eq!(start, StartPoint::Resuming { last_completed: 41 });
        assert_eq!(start.first_page(1), 42);
    }

    #[test]
    fn stale_checkpoint_never_starts_before_listing() {
        assert_eq!(StartPoint::from_checkpoint(Some(0)).first_page(1), 1);
        assert_eq!(StartPoint::from_checkpoint(Some(u32::MAX)).first_page(1), u32::MAX);
    }

    #[test]
    fn new_report_is_done_and_empty() {
        let report = ScrapeReport::new(StartPoint::Fresh);
        assert!(report.is_done());
        assert_eq!(report.records_written, 0);
        assert_eq!(report.last_completed, None);
    }
}
