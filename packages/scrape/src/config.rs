//! Site configuration for the launch scrape.
//!
//! The default configuration is baked into the binary from
//! `config/spacelaunchnow.toml`. A replacement file with the same shape
//! can be supplied at runtime.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use launch_report_scraper::html_table::LaunchTableExtractor;
use launch_report_scraper::identity::default_user_agents;
use launch_report_scraper::throttle::Throttle;
use launch_report_scraper::{ScrapeConfig, ScrapeError};
use launch_report_store::checkpoint::CheckpointStore;
use launch_report_store::csv_sink::CsvSink;
use launch_report_store::{DEFAULT_CHECKPOINT_PATH, DEFAULT_CSV_PATH};
use serde::Deserialize;

/// Embedded default configuration.
const EMBEDDED_TOML: &str = include_str!("../config/spacelaunchnow.toml");

/// Errors that can occur while loading a site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or is missing fields.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but its values are unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete scrape configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Where to crawl.
    pub site: SiteSection,
    /// How to crawl it.
    #[serde(default)]
    pub request: RequestSection,
    /// Where results go.
    #[serde(default)]
    pub output: OutputSection,
}

/// The listing being crawled.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    /// Listing URL without the `page` parameter.
    pub base_url: String,
    /// `Referer` header sent with every request.
    #[serde(default)]
    pub referer: Option<String>,
    /// CSS selector of the results table, when it differs from
    /// `table.table`.
    #[serde(default)]
    pub table_selector: Option<String>,
    /// First page of the listing.
    #[serde(default = "default_first_page")]
    pub first_page: u32,
    /// Last page of the listing.
    pub last_page: u32,
}

/// Request behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSection {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Shortest pause after a page, in milliseconds.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Longest pause after a page, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// `User-Agent` pool.
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

impl Default for RequestSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            user_agents: default_user_agents(),
        }
    }
}

/// Output file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Accumulated launch table.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    /// Last-completed-page checkpoint.
    #[serde(default = "default_checkpoint_path")]
    pub checkpoint_path: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            checkpoint_path: default_checkpoint_path(),
        }
    }
}

const fn default_first_page() -> u32 {
    1
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_min_delay_ms() -> u64 {
    2000
}

const fn default_max_delay_ms() -> u64 {
    5000
}

fn default_csv_path() -> PathBuf {
    PathBuf::from(DEFAULT_CSV_PATH)
}

fn default_checkpoint_path() -> PathBuf {
    PathBuf::from(DEFAULT_CHECKPOINT_PATH)
}

impl SiteConfig {
    /// The configuration compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded document is invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(EMBEDDED_TOML)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document is malformed or its page
    /// range is empty.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("site.base_url is empty".to_string()));
        }
        if self.site.first_page == 0 {
            return Err(ConfigError::Invalid(
                "site.first_page must be at least 1".to_string(),
            ));
        }
        if self.site.first_page > self.site.last_page {
            return Err(ConfigError::Invalid(format!(
                "site.first_page ({}) is after site.last_page ({})",
                self.site.first_page, self.site.last_page
            )));
        }
        Ok(())
    }

    /// The pages of the listing, in crawl order.
    #[must_use]
    pub const fn pages(&self) -> RangeInclusive<u32> {
        self.site.first_page..=self.site.last_page
    }

    /// Fetcher settings derived from the `[site]` and `[request]` sections.
    #[must_use]
    pub fn scrape_config(&self) -> ScrapeConfig {
        let throttle = Throttle::new(
            Duration::from_millis(self.request.min_delay_ms),
            Duration::from_millis(self.request.max_delay_ms),
        );
        let config = ScrapeConfig::new(&self.site.base_url)
            .with_timeout(Duration::from_secs(self.request.timeout_secs))
            .with_throttle(throttle)
            .with_user_agents(self.request.user_agents.clone());

        match &self.site.referer {
            Some(referer) => config.with_header("Referer", referer),
            None => config,
        }
    }

    /// The table extractor for this site's markup.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] if `site.table_selector` is not valid
    /// CSS.
    pub fn extractor(&self) -> Result<LaunchTableExtractor, ScrapeError> {
        let extractor = LaunchTableExtractor::new()?;
        match &self.site.table_selector {
            Some(selector) => extractor.with_table_selector(selector),
            None => Ok(extractor),
        }
    }

    /// The CSV sink named in `[output]`.
    #[must_use]
    pub fn csv_sink(&self) -> CsvSink {
        CsvSink::new(&self.output.csv_path)
    }

    /// The checkpoint store named in `[output]`.
    #[must_use]
    pub fn checkpoint_store(&self) -> CheckpointStore {
        CheckpointStore::new(&self.output.checkpoint_path)
    }
}
