//! Aggregate launch statistics.
//!
//! Every function takes the full normalized record set and returns rows
//! ready for rendering. Blank provider, rocket and pad cells count as
//! missing: they never contribute to a distinct count and never form a
//! group of their own. Records without a parsed date are left out of the
//! yearly and monthly views.

use std::collections::{BTreeMap, BTreeSet};

use launch_report_analytics_models::{
    LaunchAggregates, MonthlyCount, ProviderStats, ReportSummary, SiteStats, SuccessCounts,
    TOP_N, YearlyStats, success_ratio,
};
use launch_report_launch_models::{NormalizedLaunchRecord, YearMonth, non_empty};

/// Running totals for one group.
#[derive(Debug, Default)]
struct Group<'a> {
    successes: u64,
    total: u64,
    providers: BTreeSet<&'a str>,
    rockets: BTreeSet<&'a str>,
}

impl<'a> Group<'a> {
    fn add(&mut self, record: &'a NormalizedLaunchRecord) {
        self.total += 1;
        if record.success {
            self.successes += 1;
        }
        if let Some(provider) = non_empty(&record.record.provider) {
            self.providers.insert(provider);
        }
        if let Some(rocket) = non_empty(&record.record.rocket) {
            self.rockets.insert(rocket);
        }
    }
}

fn len_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Groups `records` by `key`, skipping records without one.
fn group_by<'a, K: Ord>(
    records: &'a [NormalizedLaunchRecord],
    key: impl Fn(&'a NormalizedLaunchRecord) -> Option<K>,
) -> BTreeMap<K, Group<'a>> {
    let mut groups: BTreeMap<K, Group<'a>> = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            groups.entry(k).or_default().add(record);
        }
    }
    groups
}

/// Keeps the [`TOP_N`] rows with the largest totals.
///
/// The sort is stable, so rows with equal totals stay in key order.
fn top_by_total<T: SuccessCounts>(mut rows: Vec<T>) -> Vec<T> {
    rows.sort_by(|a, b| b.total().cmp(&a.total()));
    rows.truncate(TOP_N);
    rows
}

/// Per-year statistics, ascending by year.
#[must_use]
pub fn yearly_stats(records: &[NormalizedLaunchRecord]) -> Vec<YearlyStats> {
    group_by(records, |r| r.year)
        .into_iter()
        .map(|(year, group)| YearlyStats {
            year,
            successes: group.successes,
            total: group.total,
            unique_providers: len_u64(group.providers.len()),
            unique_rockets: len_u64(group.rockets.len()),
        })
        .collect()
}

/// Launches per calendar month, in chronological order.
#[must_use]
pub fn monthly_counts(records: &[NormalizedLaunchRecord]) -> Vec<MonthlyCount> {
    group_by(records, |r| r.month)
        .into_iter()
        .map(|(month, group): (YearMonth, Group<'_>)| MonthlyCount {
            month,
            launches: group.total,
        })
        .collect()
}

/// The top providers by total launches.
#[must_use]
pub fn provider_stats(records: &[NormalizedLaunchRecord]) -> Vec<ProviderStats> {
    let rows = group_by(records, |r| non_empty(&r.record.provider))
        .into_iter()
        .map(|(provider, group)| ProviderStats {
            provider: provider.to_owned(),
            successes: group.successes,
            total: group.total,
            unique_rockets: len_u64(group.rockets.len()),
        })
        .collect();
    top_by_total(rows)
}

/// The top launch pads by total launches.
#[must_use]
pub fn site_stats(records: &[NormalizedLaunchRecord]) -> Vec<SiteStats> {
    let rows = group_by(records, |r| non_empty(&r.record.pad))
        .into_iter()
        .map(|(pad, group)| SiteStats {
            pad: pad.to_owned(),
            successes: group.successes,
            total: group.total,
            unique_providers: len_u64(group.providers.len()),
        })
        .collect();
    top_by_total(rows)
}

/// Computes all four aggregate sets.
#[must_use]
pub fn aggregate(records: &[NormalizedLaunchRecord]) -> LaunchAggregates {
    LaunchAggregates {
        yearly: yearly_stats(records),
        monthly: monthly_counts(records),
        providers: provider_stats(records),
        sites: site_stats(records),
    }
}

/// Headline numbers for the whole record set.
#[must_use]
pub fn summarize(records: &[NormalizedLaunchRecord]) -> ReportSummary {
    let mut all = Group::default();
    let mut pads = BTreeSet::new();
    for record in records {
        all.add(record);
        if let Some(pad) = non_empty(&record.record.pad) {
            pads.insert(pad);
        }
    }

    let years = records.iter().filter_map(|r| r.year);

    ReportSummary {
        total_launches: all.total,
        first_year: years.clone().min(),
        last_year: years.max(),
        success_rate: success_ratio(all.successes, all.total),
        unique_providers: len_u64(all.providers.len()),
        unique_rockets: len_u64(all.rockets.len()),
        unique_sites: len_u64(pads.len()),
    }
}

#[cfg(test)]
mod tests {
    use launch_report_launch_models::LaunchRecord;

    use super::*;
    use crate::normalize_records;

    fn launch(provider: &str, rocket: &str, pad: &str, status: &str, date: &str) -> LaunchRecord {
        LaunchRecord {
            name: format!("{provider} {rocket}"),
            status: status.to_string(),
            provider: provider.to_string(),
            rocket: rocket.to_string(),
            mission: String::new(),
            date: date.to_string(),
            pad: pad.to_string(),
        }
    }

    fn sample() -> Vec<NormalizedLaunchRecord> {
        normalize_records(vec![
            launch("SpaceX", "Falcon 9", "SLC-40", "Launch Successful", "June 4, 2010 noon"),
            launch("SpaceX", "Falcon 9", "SLC-40", "Launch Failure", "Dec. 8, 2010, 3:43 p.m."),
            launch("SpaceX", "Falcon Heavy", "LC-39A", "Launch Successful", "Feb. 6, 2018, 8:45 p.m."),
            launch("Arianespace", "Ariane 5", "ELA-3", "Launch Successful", "Dec. 25, 2021, 12:20 p.m."),
            launch("Arianespace", "Vega", "ELV", "Partial Failure", "2010-06-20 01:00"),
            launch("", "Unknown", "", "Launch Successful", "TBD"),
        ])
    }

    #[test]
    fn yearly_groups_dated_records() {
        let yearly = yearly_stats(&sample());
        let years: Vec<i32> = yearly.iter().map(|r| r.year).collect();
        assert_eq!(years, [2010, 2018, 2021]);

        let y2010 = &yearly[0];
        assert_eq!(y2010.total, 3);
        assert_eq!(y2010.successes, 1);
        assert_eq!(y2010.unique_providers, 2);
        assert_eq!(y2010.unique_rockets, 2);
    }

    #[test]
    fn monthly_is_chronological() {
        let monthly = monthly_counts(&sample());
        let labels: Vec<String> = monthly.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(labels, ["2010-06", "2010-12", "2018-02", "2021-12"]);
        assert_eq!(monthly[0].launches, 2);
        assert_eq!(monthly.iter().map(|m| m.launches).sum::<u64>(), 5);
    }

    #[test]
    fn providers_sorted_by_total_and_skip_blank() {
        let providers = provider_stats(&sample());
        let names: Vec<&str> = providers.iter().map(|p| p.provider.as_str()).collect();
        assert_eq!(names, ["SpaceX", "Arianespace"]);
        assert_eq!(providers[0].total, 3);
        assert_eq!(providers[0].successes, 2);
        assert_eq!(providers[0].unique_rockets, 2);
    }

    #[test]
    fn sites_count_distinct_providers() {
        let sites = site_stats(&sample());
        assert_eq!(sites[0].pad, "SLC-40");
        assert_eq!(sites[0].total, 2);
        assert_eq!(sites[0].unique_providers, 1);
        assert!(sites.iter().all(|s| !s.pad.is_empty()));
    }

    #[test]
    fn rankings_keep_top_ten_with_stable_ties() {
        let records: Vec<LaunchRecord> = (0..15)
            .flat_map(|i| {
                let copies = if i == 14 { 3 } else { 1 };
                (0..copies).map(move |_| {
                    launch(&format!("P{i:02}"), "R", &format!("Pad {i:02}"), "Successful", "2020-01-01")
                })
            })
            .collect();
        let normalized = normalize_records(records);

        let providers = provider_stats(&normalized);
        assert_eq!(providers.len(), TOP_N);
        assert_eq!(providers[0].provider, "P14");
        let tail: Vec<&str> = providers[1..].iter().map(|p| p.provider.as_str()).collect();
        assert_eq!(tail, ["P00", "P01", "P02", "P03", "P04", "P05", "P06", "P07", "P08"]);

        let sites = site_stats(&normalized);
        assert_eq!(sites.len(), TOP_N);
        assert!(sites.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn ratios_are_bounded() {
        let records = sample();
        let aggregates = aggregate(&records);
        let rows: Vec<(u64, u64, f64)> = aggregates
            .yearly
            .iter()
            .map(|r| (r.successes, r.total, r.success_ratio()))
            .chain(
                aggregates
                    .providers
                    .iter()
                    .map(|r| (r.successes, r.total, r.success_ratio())),
            )
            .chain(
                aggregates
                    .sites
                    .iter()
                    .map(|r| (r.successes, r.total, r.success_ratio())),
            )
            .collect();
        assert!(!rows.is_empty());
        for (successes, total, ratio) in rows {
            assert!(successes <= total);
            assert!(total >= 1);
            assert!((0.0..=1.0).contains(&ratio));
        }
    }

    #[test]
    fn summary_covers_all_records() {
        let summary = summarize(&sample());
        assert_eq!(summary.total_launches, 6);
        assert_eq!(summary.first_year, Some(2010));
        assert_eq!(summary.last_year, Some(2021));
        assert!((summary.success_rate - 4.0 / 6.0).abs() < 1e-9);
        assert_eq!(summary.unique_providers, 2);
        assert_eq!(summary.unique_rockets, 5);
        assert_eq!(summary.unique_sites, 4);
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        let aggregates = aggregate(&[]);
        assert_eq!(aggregates, LaunchAggregates::default());
        let summary = summarize(&[]);
        assert_eq!(summary.total_launches, 0);
        assert_eq!(summary.first_year, None);
    }
}
