#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Launch analytics.
//!
//! Turns raw scraped [`LaunchRecord`]s into [`NormalizedLaunchRecord`]s
//! (see [`dates`]) and computes the aggregate statistics the report renders
//! (see [`stats`]). Everything here is a pure function of its input.

pub mod dates;
pub mod stats;

use launch_report_launch_models::{LaunchRecord, NormalizedLaunchRecord};

use crate::dates::parse_launch_date;

/// Parses every record's date, derives its buckets and success flag, and
/// sorts the result by launch date.
///
/// The sort is stable; records with a missing date keep their relative
/// order and sort after every dated record. Unparseable dates are logged.
#[must_use]
pub fn normalize_records(records: Vec<LaunchRecord>) -> Vec<NormalizedLaunchRecord> {
    let mut normalized: Vec<NormalizedLaunchRecord> = records
        .into_iter()
        .map(|record| {
            let date = parse_launch_date(&record.date);
            if date.is_missing() {
                log::warn!("Failed to parse date: {:?} ({})", record.date, record.name);
            }
            NormalizedLaunchRecord::new(record, date)
        })
        .collect();

    normalized.sort_by_key(|r| r.date);
    normalized
}
