//! Launch listing table extractor.
//!
//! Locates the results `<table>` via CSS selector and turns every body row
//! with exactly seven cells into a [`LaunchRecord`]. The first row is the
//! header and is always skipped.

use launch_report_launch_models::LaunchRecord;
use scraper::{Html, Selector};

use crate::ScrapeError;

/// Number of cells a launch row must have.
pub const LAUNCH_ROW_CELLS: usize = LaunchRecord::FIELDS.len();

/// Extracts launch records from a listing page.
///
/// The default selectors match the listing site's markup.
/// [`with_table_selector`](Self::with_table_selector) points the extractor
/// at a different results table.
#[derive(Debug, Clone)]
pub struct LaunchTableExtractor {
    /// Selector for the results table element.
    table_selector: Selector,
    /// Selector for rows inside the table.
    row_selector: Selector,
    /// Selector for cells within a row.
    cell_selector: Selector,
}

impl LaunchTableExtractor {
    /// Creates an extractor for `table.table` / `tr` / `td` markup.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] if a built-in selector fails to parse.
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            table_selector: parse_selector("table.table")?,
            row_selector: parse_selector("tr")?,
            cell_selector: parse_selector("td")?,
        })
    }

    /// Overrides the CSS selector used to locate the table element.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] if `selector` is not valid CSS.
    pub fn with_table_selector(mut self, selector: &str) -> Result<Self, ScrapeError> {
        self.table_selector = parse_selector(selector)?;
        Ok(self)
    }

    /// Extracts launch records from `html`.
    ///
    /// Returns `None` when the page has no results table. Rows without
    /// exactly [`LAUNCH_ROW_CELLS`] cells are skipped.
    #[must_use]
    pub fn extract(&self, html: &str) -> Option<Vec<LaunchRecord>> {
        let document = Html::parse_document(html);

        let Some(table) = document.select(&self.table_selector).next() else {
            log::warn!("No table found on the page");
            return None;
        };
        log::debug!("Found table on the page");

        let rows: Vec<_> = table.select(&self.row_selector).skip(1).collect();
        log::info!("Found {} rows in the table", rows.len());

        let mut launches = Vec::with_capacity(rows.len());

        for (index, row) in rows.into_iter().enumerate() {
            let cells: Vec<String> = row
                .select(&self.cell_selector)
                .map(|el| el.text().collect::<String>().trim().to_owned())
                .collect();

            let cell_count = cells.len();
            match LaunchRecord::from_cells(cells) {
                Some(launch) => {
                    log::debug!("Extracted launch: {}", launch.name);
                    launches.push(launch);
                }
                None => {
                    log::debug!(
                        "Skipping row {} with {cell_count} cells (expected {LAUNCH_ROW_CELLS})",
                        index + 1
                    );
                }
            }
        }

        Some(launches)
    }
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("invalid CSS selector '{selector}': {e}")))
}
