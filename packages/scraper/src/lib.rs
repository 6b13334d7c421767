#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scraper for the paginated launch listing.
//!
//! Provides the [`Scraper`] trait, the HTTP-backed [`fetcher::LaunchPageFetcher`]
//! that implements it, and the [`html_table::LaunchTableExtractor`] that
//! turns one listing page into [`LaunchRecord`]s.
//!
//! This crate knows nothing about where records end up. Persisting pages
//! and tracking progress across runs is the driver's job.

pub mod fetcher;
pub mod html_table;
pub mod identity;
pub mod progress;
pub mod throttle;

use std::collections::BTreeMap;
use std::time::Duration;

use launch_report_launch_models::LaunchRecord;

use crate::throttle::Throttle;

/// Errors that can occur during scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP status {status} for {url}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Requested URL.
        url: String,
    },

    /// Parsing configuration or the response body failed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// How a page fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum PageOutcome {
    /// The results table was found; `records` may still be empty if every
    /// row was malformed.
    Extracted,
    /// The page loaded but had no results table.
    NoTable,
    /// The request failed or returned a non-success status.
    FetchFailed,
}

/// A single page of scraped launch records.
#[derive(Debug, Clone)]
pub struct ScrapedPage {
    /// The records extracted from this page, in table order.
    pub records: Vec<LaunchRecord>,
    /// The one-indexed page number of this result set.
    pub page_number: u32,
    /// How the fetch ended.
    pub outcome: PageOutcome,
}

impl ScrapedPage {
    /// An empty page for a fetch that ended with `outcome`.
    #[must_use]
    pub const fn empty(page_number: u32, outcome: PageOutcome) -> Self {
        Self {
            records: Vec::new(),
            page_number,
            outcome,
        }
    }
}

/// Configuration for the listing scraper.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Listing URL; the page number is appended as a `page` query parameter.
    pub url: String,
    /// Static HTTP headers sent with every request.
    pub headers: BTreeMap<String, String>,
    /// Pool of `User-Agent` strings, one picked at random per request.
    pub user_agents: Vec<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause taken after every page.
    pub throttle: Throttle,
}

impl ScrapeConfig {
    /// Creates a new `ScrapeConfig` for `url` with the default identity
    /// pool, a 10 second timeout and a 2-5 second pause between pages.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            headers: BTreeMap::new(),
            user_agents: identity::default_user_agents(),
            timeout: Duration::from_secs(10),
            throttle: Throttle::new(Duration::from_secs(2), Duration::from_secs(5)),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pause taken after every page.
    #[must_use]
    pub const fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Replaces the `User-Agent` pool.
    #[must_use]
    pub fn with_user_agents(mut self, user_agents: Vec<String>) -> Self {
        self.user_agents = user_agents;
        self
    }

    /// Adds an HTTP header to include in requests.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Returns the URL for one-indexed page `page`.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}page={page}", self.url)
    }
}

/// Trait for fetching launch records one page at a time.
///
/// Page-local failures (network errors, HTTP errors, pages without a
/// table) are reported through [`ScrapedPage::outcome`] with no records.
/// An `Err` means something unexpected happened and the caller should stop.
pub trait Scraper: Send + Sync {
    /// Fetches and extracts a single page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] only for failures that are not local to the
    /// page.
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl std::future::Future<Output = Result<ScrapedPage, ScrapeError>> + Send;

    /// Returns the name of the scraping strategy (e.g. `"html_table"`).
    fn strategy(&self) -> &str;
}
