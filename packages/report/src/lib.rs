#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spreadsheet report of scraped launches.
//!
//! [`generate_report`] reads the CSV produced by the scrape, normalizes
//! dates, computes the aggregate statistics and writes them with the raw
//! rows into a styled workbook (see [`writer::ReportWriter`]).

pub mod styles;
pub mod writer;

use std::path::Path;

use launch_report_analytics::normalize_records;
use launch_report_analytics::stats::{aggregate, summarize};
use launch_report_analytics_models::ReportSummary;
use launch_report_store::StoreError;
use launch_report_store::csv_sink::CsvSink;

use crate::writer::ReportWriter;

/// Default path of the generated workbook.
pub const DEFAULT_REPORT_PATH: &str = "space_launches_advanced_report.xlsx";

/// Errors that can occur while building the report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The launch table could not be read.
    #[error("Failed to read launches: {0}")]
    Input(#[from] StoreError),

    /// The workbook rejected a value or could not be saved.
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Builds the workbook at `output` from the launch table at `input`.
///
/// Returns the headline numbers for the analyzed records.
///
/// # Errors
///
/// Returns [`ReportError`] if the input cannot be read or the workbook
/// cannot be written.
pub fn generate_report(input: &Path, output: &Path) -> Result<ReportSummary, ReportError> {
    let launches = CsvSink::new(input).read_all()?;
    let records = normalize_records(launches);
    let aggregates = aggregate(&records);

    log::info!(
        "Aggregated {} years, {} months, {} providers and {} sites",
        aggregates.yearly.len(),
        aggregates.monthly.len(),
        aggregates.providers.len(),
        aggregates.sites.len()
    );

    let mut writer = ReportWriter::new();
    writer.write_report(&records, &aggregates)?;
    writer.save(output)?;

    Ok(summarize(&records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "launch_report_report_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn generates_workbook_from_csv() {
        let dir = temp_dir("generate");
        let input = dir.join("space_launches.csv");
        let output = dir.join("report.xlsx");
        std::fs::write(
            &input,
            "name,status,provider,rocket,mission,date,pad\n\
             Falcon 9 Flight 1,Successful,SpaceX,Falcon 9,Test Mission,\"June 4, 2010 noon\",SLC-40\n\
             Falcon 9 Flight 2,Launch Failure,SpaceX,Falcon 9,COTS Demo,\"Dec. 8, 2010, 3:43 p.m.\",SLC-40\n\
             Mystery,Successful,,,,,\n",
        )
        .unwrap();

        let summary = generate_report(&input, &output).unwrap();

        assert_eq!(summary.total_launches, 3);
        assert_eq!(summary.first_year, Some(2010));
        assert_eq!(summary.last_year, Some(2010));
        assert_eq!(summary.unique_providers, 1);
        assert_eq!(summary.unique_sites, 1);
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn missing_input_is_an_input_error() {
        let dir = temp_dir("missing_input");
        let err = generate_report(&dir.join("nope.csv"), &dir.join("report.xlsx")).unwrap_err();
        assert!(matches!(err, ReportError::Input(_)));
        assert!(!dir.join("report.xlsx").exists());
    }
}
