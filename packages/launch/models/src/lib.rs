#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Launch record types.
//!
//! A [`LaunchRecord`] is one row of the scraped launch listing, stored
//! verbatim. A [`NormalizedLaunchRecord`] wraps it with the parsed launch
//! date and the fields derived from it, and is what the analytics and
//! report crates work with.

use chrono::{Datelike as _, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One launch as scraped from the listing table.
///
/// Field order matches the CSV column order and the table column order on
/// the listing site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Launch name (e.g. `"Falcon 9 Flight 1"`).
    pub name: String,
    /// Free-form status text (e.g. `"Launch Successful"`).
    pub status: String,
    /// Launch service provider.
    pub provider: String,
    /// Rocket configuration.
    pub rocket: String,
    /// Mission name.
    pub mission: String,
    /// Launch date exactly as it appeared on the page.
    pub date: String,
    /// Launch pad.
    pub pad: String,
}

impl LaunchRecord {
    /// CSV header / table column names, in order.
    pub const FIELDS: [&'static str; 7] = [
        "name", "status", "provider", "rocket", "mission", "date", "pad",
    ];

    /// Builds a record from the seven table cells in column order.
    ///
    /// Returns `None` unless exactly seven cells are given.
    #[must_use]
    pub fn from_cells(cells: Vec<String>) -> Option<Self> {
        let [name, status, provider, rocket, mission, date, pad]: [String; 7] =
            cells.try_into().ok()?;
        Some(Self {
            name,
            status,
            provider,
            rocket,
            mission,
            date,
            pad,
        })
    }

    /// Whether the status text marks the launch as successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.to_lowercase().contains("successful")
    }
}

/// A parsed launch date, or the explicit marker for one that could not be
/// parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaunchDate {
    /// A valid timestamp (naive, treated as UTC).
    At(NaiveDateTime),
    /// The date was empty or unparseable.
    Missing,
}

impl LaunchDate {
    /// Returns the timestamp, if present.
    #[must_use]
    pub const fn timestamp(self) -> Option<NaiveDateTime> {
        match self {
            Self::At(dt) => Some(dt),
            Self::Missing => None,
        }
    }

    /// Returns `true` for [`LaunchDate::Missing`].
    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<Option<NaiveDateTime>> for LaunchDate {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Self::Missing, Self::At)
    }
}

/// Calendar month bucket used for the monthly trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Returns the bucket containing `dt`.
    #[must_use]
    pub fn of(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A launch record with its parsed date and derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLaunchRecord {
    /// The record as scraped.
    pub record: LaunchRecord,
    /// The parsed launch date.
    pub date: LaunchDate,
    /// Year of the launch, when the date parsed.
    pub year: Option<i32>,
    /// Year-month bucket of the launch, when the date parsed.
    pub month: Option<YearMonth>,
    /// Whether the status text marks the launch as successful.
    pub success: bool,
}

impl NormalizedLaunchRecord {
    /// Derives the year, month and success flag for `record`.
    #[must_use]
    pub fn new(record: LaunchRecord, date: LaunchDate) -> Self {
        let timestamp = date.timestamp();
        let success = record.is_success();
        Self {
            year: timestamp.map(|dt| dt.year()),
            month: timestamp.as_ref().map(YearMonth::of),
            success,
            record,
            date,
        }
    }
}

/// Returns `value` unless it is empty, mirroring how the report treats
/// blank CSV cells as missing.
#[must_use]
pub fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn cells(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("cell{i}")).collect()
    }

    #[test]
    fn builds_record_from_seven_cells() {
        let record = LaunchRecord::from_cells(cells(7)).unwrap();
        assert_eq!(record.name, "cell0");
        assert_eq!(record.date, "cell5");
        assert_eq!(record.pad, "cell6");
    }

    #[test]
    fn rejects_wrong_cell_count() {
        assert!(LaunchRecord::from_cells(cells(6)).is_none());
        assert!(LaunchRecord::from_cells(cells(8)).is_none());
    }

    #[test]
    fn success_is_case_insensitive_substring() {
        let mut record = LaunchRecord {
            status: "Launch SUCCESSFUL".to_string(),
            ..LaunchRecord::default()
        };
        assert!(record.is_success());
        record.status = "Launch Failure".to_string();
        assert!(!record.is_success());
        record.status = "Partial Failure".to_string();
        assert!(!record.is_success());
    }

    #[test]
    fn derives_year_and_month() {
        let dt = NaiveDate::from_ymd_opt(2010, 6, 4)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let normalized = NormalizedLaunchRecord::new(
            LaunchRecord {
                status: "Successful".to_string(),
                ..LaunchRecord::default()
            },
            LaunchDate::At(dt),
        );
        assert_eq!(normalized.year, Some(2010));
        assert_eq!(normalized.month.unwrap().to_string(), "2010-06");
        assert!(normalized.success);
    }

    #[test]
    fn missing_date_has_no_derived_buckets() {
        let normalized = NormalizedLaunchRecord::new(LaunchRecord::default(), LaunchDate::Missing);
        assert_eq!(normalized.year, None);
        assert_eq!(normalized.month, None);
        assert!(!normalized.success);
    }

    #[test]
    fn missing_sorts_after_valid_dates() {
        let dt = NaiveDate::from_ymd_opt(1957, 10, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(LaunchDate::At(dt) < LaunchDate::Missing);
    }
}
