//! HTTP page fetcher for the launch listing.
//!
//! One GET per page through a single [`reqwest::Client`] session, with a
//! randomly chosen `User-Agent` on every request. Network and HTTP failures
//! are logged and reported as an empty page so a bad page never stops the
//! crawl on its own. Every call ends with the configured [`Throttle`] pause,
//! whether the page loaded or not.
//!
//! [`Throttle`]: crate::throttle::Throttle

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::html_table::LaunchTableExtractor;
use crate::identity::pick_user_agent;
use crate::{PageOutcome, ScrapeConfig, ScrapeError, ScrapedPage, Scraper};

/// Static headers sent alongside the rotating `User-Agent`.
pub const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("DNT", "1"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Fetches listing pages over HTTP and extracts their launch tables.
#[derive(Debug, Clone)]
pub struct LaunchPageFetcher {
    config: ScrapeConfig,
    client: reqwest::Client,
    extractor: LaunchTableExtractor,
}

impl LaunchPageFetcher {
    /// Builds the HTTP session for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if a configured header is invalid or the
    /// client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = build_client(&config)?;
        Ok(Self {
            config,
            client,
            extractor: LaunchTableExtractor::new()?,
        })
    }

    /// Replaces the table extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: LaunchTableExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Performs the GET for `url` and returns the body.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] on transport failure and
    /// [`ScrapeError::Status`] on a non-success status.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let user_agent = pick_user_agent(&self.config.user_agents).to_owned();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status,
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        log::debug!("Successfully retrieved page: {url}");
        Ok(body)
    }

    /// Fetches and extracts `page` without the trailing pause.
    async fn fetch_unthrottled(&self, page: u32) -> ScrapedPage {
        let url = self.config.page_url(page);
        log::info!("Attempting to scrape data from {url}");

        let body = match self.fetch_html(&url).await {
            Ok(body) => body,
            Err(e) => {
                log::error!("Failed to retrieve {url}: {e}");
                return ScrapedPage::empty(page, PageOutcome::FetchFailed);
            }
        };

        let Some(records) = self.extractor.extract(&body) else {
            return ScrapedPage::empty(page, PageOutcome::NoTable);
        };

        log::info!("Scraped {} launches from the page", records.len());
        ScrapedPage {
            records,
            page_number: page,
            outcome: PageOutcome::Extracted,
        }
    }
}

impl Scraper for LaunchPageFetcher {
    async fn fetch_page(&self, page: u32) -> Result<ScrapedPage, ScrapeError> {
        let scraped = self.fetch_unthrottled(page).await;
        self.config.throttle.pause().await;
        Ok(scraped)
    }

    fn strategy(&self) -> &'static str {
        "html_table"
    }
}

/// Builds a [`reqwest::Client`] with the static browser headers, the
/// configured extra headers and the request timeout.
fn build_client(config: &ScrapeConfig) -> Result<reqwest::Client, ScrapeError> {
    let mut header_map = HeaderMap::new();
    let configured = config
        .headers
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()));

    for (key, value) in BROWSER_HEADERS.iter().copied().chain(configured) {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| ScrapeError::Parse(format!("invalid header name '{key}': {e}")))?;
        let val = HeaderValue::from_str(value)
            .map_err(|e| ScrapeError::Parse(format!("invalid header value '{value}': {e}")))?;
        header_map.insert(name, val);
    }

    reqwest::Client::builder()
        .default_headers(header_map)
        .timeout(config.timeout)
        .build()
        .map_err(ScrapeError::Http)
}
