//! Launch date normalization.
//!
//! Listing dates are free-form (`"Dec. 6, 1957, 4:44 p.m."`,
//! `"June 4, 2010 noon"`, `"2021-05-15 22:56"`). [`parse_launch_date`]
//! accepts the shapes seen in practice and returns [`LaunchDate::Missing`]
//! for anything else; [`format_launch_date`] renders the canonical
//! `YYYY-MM-DD HH:MM` form.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime, Timelike as _};
use launch_report_launch_models::LaunchDate;
use regex::Regex;

/// Output format for normalized timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Date-and-time shapes tried in order after clean-up.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%B %d %Y %I:%M:%S %p",
    "%B %d %Y %I:%M %p",
    "%B %d %Y %H:%M:%S",
    "%B %d %Y %H:%M",
    "%d %B %Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only shapes; these resolve to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d %Y", "%d %B %Y", "%m/%d/%Y"];

static NOON: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)noon"));

static MIDNIGHT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)midnight"));

static WEEKDAY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?\s+"));

static MERIDIEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\b([ap])\.?m\.?(\s|$)"));

static ATTACHED_MERIDIEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(\d)([ap]m)\b"));

static HOUR_ONLY: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(^|\s)(\d{1,2})\s+([ap]m)\b"));

static ABBREVIATION_DOT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\b([a-z]{3,9})\."));

static SEPT: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\bsept\b"));

static ORDINAL: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b"));

static FULL_YEAR: LazyLock<Regex> = LazyLock::new(|| pattern(r"\b(\d{4})\b"));

static ZONE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\s*(?:utc|gmt|z)$"));

/// Parses a listing date.
///
/// A `"noon"` or `"midnight"` marker (any case) is stripped, the rest is
/// parsed as a date, and the time is forced to 12:00 or 00:00. Anything
/// else goes through the flexible parser. Returns [`LaunchDate::Missing`]
/// when nothing matches; callers decide whether to log it.
#[must_use]
pub fn parse_launch_date(raw: &str) -> LaunchDate {
    let parsed = if NOON.is_match(raw) {
        parse_flexible(&NOON.replace_all(raw, " ")).and_then(|dt| at_time(dt, 12))
    } else if MIDNIGHT.is_match(raw) {
        parse_flexible(&MIDNIGHT.replace_all(raw, " ")).and_then(|dt| at_time(dt, 0))
    } else {
        parse_flexible(raw)
    };
    LaunchDate::from(parsed)
}

/// Renders `date` as `YYYY-MM-DD HH:MM`, or `""` when missing.
#[must_use]
pub fn format_launch_date(date: LaunchDate) -> String {
    match date {
        LaunchDate::At(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        LaunchDate::Missing => String::new(),
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|_| unreachable!())
}

/// Replaces the hour and minute of `dt`.
fn at_time(dt: NaiveDateTime, hour: u32) -> Option<NaiveDateTime> {
    dt.with_hour(hour)?.with_minute(0)
}

/// Parses a date with optional time in any of the supported shapes.
#[must_use]
pub fn parse_flexible(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }

    let cleaned = clean(trimmed);
    if cleaned.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDateTime::parse_from_str(&cleaned, fmt)
                .ok()
                .filter(|dt| has_full_year(&cleaned, dt.year()))
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| {
                    NaiveDate::parse_from_str(&cleaned, fmt)
                        .ok()
                        .filter(|date| has_full_year(&cleaned, date.year()))
                })
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `%Y` accepts short years and `%d` can borrow digits from the year, so
/// a parse only counts when its year is written out as four digits.
fn has_full_year(cleaned: &str, year: i32) -> bool {
    FULL_YEAR
        .captures_iter(cleaned)
        .any(|caps| caps[1].parse::<i32>().is_ok_and(|y| y == year))
}

/// Rewrites listing-style dates into something the `chrono` formats accept.
fn clean(raw: &str) -> String {
    let s = raw.replace(',', " ");
    let s = collapse_whitespace(&s);
    let s = WEEKDAY.replace(&s, "");
    let s = MERIDIEM.replace_all(&s, "${1}m$2");
    let s = ATTACHED_MERIDIEM.replace_all(&s, "$1 $2");
    let s = HOUR_ONLY.replace_all(&s, "$1$2:00 $3");
    let s = ABBREVIATION_DOT.replace_all(&s, "$1");
    let s = SEPT.replace_all(&s, "sep");
    let s = ORDINAL.replace_all(&s, "$1");
    let s = ZONE.replace(&s, "");
    collapse_whitespace(&s)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
