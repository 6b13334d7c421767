#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate statistics row types for the launch report.
//!
//! Each row carries its grouping key, success and total counts, any
//! distinct counts of secondary dimensions, and exposes the derived
//! success ratio through [`SuccessCounts`].

use launch_report_launch_models::YearMonth;
use serde::{Deserialize, Serialize};

/// Maximum number of rows kept in the provider and site rankings.
pub const TOP_N: usize = 10;

/// Computes `successes / total`, or `0.0` for an empty group.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn success_ratio(successes: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        successes as f64 / total as f64
    }
}

/// Rows that carry a success count and a total count.
pub trait SuccessCounts {
    /// Number of successful launches in the group.
    fn successes(&self) -> u64;

    /// Number of launches in the group.
    fn total(&self) -> u64;

    /// Fraction of launches in the group that succeeded.
    fn success_ratio(&self) -> f64 {
        success_ratio(self.successes(), self.total())
    }
}

/// Launch statistics for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStats {
    /// Calendar year.
    pub year: i32,
    /// Successful launches.
    pub successes: u64,
    /// All launches.
    pub total: u64,
    /// Distinct launch providers.
    pub unique_providers: u64,
    /// Distinct rockets.
    pub unique_rockets: u64,
}

/// Launch count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Month bucket.
    pub month: YearMonth,
    /// Launches in the month.
    pub launches: u64,
}

/// Launch statistics for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    /// Provider name.
    pub provider: String,
    /// Successful launches.
    pub successes: u64,
    /// All launches.
    pub total: u64,
    /// Distinct rockets flown.
    pub unique_rockets: u64,
}

/// Launch statistics for one launch pad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    /// Launch pad name.
    pub pad: String,
    /// Successful launches.
    pub successes: u64,
    /// All launches.
    pub total: u64,
    /// Distinct providers that launched from the pad.
    pub unique_providers: u64,
}

macro_rules! impl_success_counts {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SuccessCounts for $ty {
                fn successes(&self) -> u64 {
                    self.successes
                }

                fn total(&self) -> u64 {
                    self.total
                }
            }
        )+
    };
}

impl_success_counts!(YearlyStats, ProviderStats, SiteStats);

/// All aggregate sets the report renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAggregates {
    /// Per-year statistics, ascending by year.
    pub yearly: Vec<YearlyStats>,
    /// Per-month launch counts, chronological.
    pub monthly: Vec<MonthlyCount>,
    /// Top providers by total launches.
    pub providers: Vec<ProviderStats>,
    /// Top launch pads by total launches.
    pub sites: Vec<SiteStats>,
}

/// Headline numbers for the whole record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Records analyzed.
    pub total_launches: u64,
    /// Earliest launch year, if any date parsed.
    pub first_year: Option<i32>,
    /// Latest launch year, if any date parsed.
    pub last_year: Option<i32>,
    /// Fraction of all records that were successful.
    pub success_rate: f64,
    /// Distinct providers.
    pub unique_providers: u64,
    /// Distinct rockets.
    pub unique_rockets: u64,
    /// Distinct launch pads.
    pub unique_sites: u64,
}

impl std::fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total launches analyzed: {}", self.total_launches)?;
        match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => writeln!(f, "Date range: {first} to {last}")?,
            _ => writeln!(f, "Date range: unknown")?,
        }
        writeln!(f, "Overall success rate: {:.2}%", self.success_rate * 100.0)?;
        writeln!(f, "Total unique providers: {}", self.unique_providers)?;
        writeln!(f, "Total unique rockets: {}", self.unique_rockets)?;
        write!(f, "Total launch sites: {}", self.unique_sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_empty_group_is_zero() {
        assert!(success_ratio(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_divides_successes_by_total() {
        let row = ProviderStats {
            provider: "SpaceX".to_string(),
            successes: 3,
            total: 4,
            unique_rockets: 2,
        };
        assert!((row.success_ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_renders_percentage() {
        let summary = ReportSummary {
            total_launches: 4,
            first_year: Some(1957),
            last_year: Some(2024),
            success_rate: 0.5,
            unique_providers: 2,
            unique_rockets: 3,
            unique_sites: 1,
        };
        let text = summary.to_string();
        assert!(text.contains("Date range: 1957 to 2024"));
        assert!(text.contains("Overall success rate: 50.00%"));
    }
}
