//! Workbook rendering.
//!
//! [`ReportWriter`] owns one [`Workbook`] and adds one sheet per call.
//! Each sheet gets a styled header row, a banded table over its data and
//! auto-fitted columns. Sheets with no data keep their header row only and
//! get no table or chart.

use std::borrow::Cow;
use std::path::Path;

use launch_report_analytics::dates::format_launch_date;
use launch_report_analytics_models::{
    LaunchAggregates, MonthlyCount, ProviderStats, SiteStats, SuccessCounts, YearlyStats,
};
use launch_report_launch_models::NormalizedLaunchRecord;
use rust_xlsxwriter::{
    Chart, ChartType, ColNum, RowNum, Table, TableColumn, TableStyle, Workbook, Worksheet,
};

use crate::ReportError;
use crate::styles::Styles;

/// Raw launch rows.
pub const LAUNCHES_SHEET: &str = "Space Launches";
/// Per-year statistics.
pub const YEARLY_SHEET: &str = "Yearly Statistics";
/// Monthly launch counts and their trend chart.
pub const TRENDS_SHEET: &str = "Launch Trends";
/// Top providers and their column chart.
pub const PROVIDERS_SHEET: &str = "Provider Performance";
/// Top launch sites and their pie chart.
pub const SITES_SHEET: &str = "Launch Sites";

pub const LAUNCH_HEADERS: &[&str] = &[
    "Name",
    "Date",
    "Status",
    "Provider",
    "Rocket",
    "Mission",
    "Launch Pad",
];
pub const YEARLY_HEADERS: &[&str] = &[
    "Year",
    "Successful Launches",
    "Total Launches",
    "Success Rate",
    "Unique Providers",
    "Unique Rockets",
];
pub const TREND_HEADERS: &[&str] = &["Month", "Launches"];
pub const PROVIDER_HEADERS: &[&str] = &[
    "Provider",
    "Successful Launches",
    "Total Launches",
    "Success Rate",
    "Unique Rockets",
];
pub const SITE_HEADERS: &[&str] = &[
    "Launch Site",
    "Successful Launches",
    "Total Launches",
    "Success Rate",
    "Unique Providers",
];

const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 480;

#[allow(clippy::cast_precision_loss)]
const fn count(n: u64) -> f64 {
    n as f64
}

/// A single value on a sheet row, tagged with how it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    /// Text in the data style.
    Text(Cow<'a, str>),
    /// Number in the data style.
    Number(f64),
    /// Fraction shown as a percentage.
    Percent(f64),
}

/// Raw sheet row: the listing columns with the date in display form.
#[must_use]
pub fn launch_row(launch: &NormalizedLaunchRecord) -> [Cell<'_>; 7] {
    let r = &launch.record;
    [
        Cell::Text(Cow::Borrowed(&r.name)),
        Cell::Text(Cow::Owned(format_launch_date(launch.date))),
        Cell::Text(Cow::Borrowed(&r.status)),
        Cell::Text(Cow::Borrowed(&r.provider)),
        Cell::Text(Cow::Borrowed(&r.rocket)),
        Cell::Text(Cow::Borrowed(&r.mission)),
        Cell::Text(Cow::Borrowed(&r.pad)),
    ]
}

/// Yearly sheet row, in [`YEARLY_HEADERS`] order.
#[must_use]
pub fn yearly_row(stats: &YearlyStats) -> [Cell<'static>; 6] {
    [
        Cell::Number(f64::from(stats.year)),
        Cell::Number(count(stats.successes)),
        Cell::Number(count(stats.total)),
        Cell::Percent(stats.success_ratio()),
        Cell::Number(count(stats.unique_providers)),
        Cell::Number(count(stats.unique_rockets)),
    ]
}

/// Trend sheet row: `YYYY-MM` and the launch count.
#[must_use]
pub fn trend_row(month: &MonthlyCount) -> [Cell<'static>; 2] {
    [
        Cell::Text(Cow::Owned(month.month.to_string())),
        Cell::Number(count(month.launches)),
    ]
}

/// Provider sheet row, in [`PROVIDER_HEADERS`] order.
#[must_use]
pub fn provider_row(stats: &ProviderStats) -> [Cell<'_>; 5] {
    [
        Cell::Text(Cow::Borrowed(&stats.provider)),
        Cell::Number(count(stats.successes)),
        Cell::Number(count(stats.total)),
        Cell::Percent(stats.success_ratio()),
        Cell::Number(count(stats.unique_rockets)),
    ]
}

/// Site sheet row, in [`SITE_HEADERS`] order.
#[must_use]
pub fn site_row(stats: &SiteStats) -> [Cell<'_>; 5] {
    [
        Cell::Text(Cow::Borrowed(&stats.pad)),
        Cell::Number(count(stats.successes)),
        Cell::Number(count(stats.total)),
        Cell::Percent(stats.success_ratio()),
        Cell::Number(count(stats.unique_providers)),
    ]
}

/// Builds the launch report workbook.
pub struct ReportWriter {
    workbook: Workbook,
    styles: Styles,
}

impl ReportWriter {
    /// Creates an empty workbook with the report styles.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            styles: Styles::new(),
        }
    }

    /// Adds all five sheets in report order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if any cell, table or chart is rejected.
    pub fn write_report(
        &mut self,
        records: &[NormalizedLaunchRecord],
        aggregates: &LaunchAggregates,
    ) -> Result<(), ReportError> {
        self.write_launches(records)?;
        self.write_yearly(&aggregates.yearly)?;
        self.write_trends(&aggregates.monthly)?;
        self.write_providers(&aggregates.providers)?;
        self.write_sites(&aggregates.sites)?;
        Ok(())
    }

    /// Adds the raw launch sheet with a frozen header row.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the sheet cannot be written.
    pub fn write_launches(&mut self, records: &[NormalizedLaunchRecord]) -> Result<(), ReportError> {
        let mut sheet = self.new_sheet(LAUNCHES_SHEET, LAUNCH_HEADERS)?;
        sheet.set_freeze_panes(1, 0)?;

        let mut last_row = 0;
        for (row, launch) in (1..).zip(records) {
            self.write_row(&mut sheet, row, &launch_row(launch))?;
            last_row = row;
        }

        self.finish_sheet(sheet, LAUNCH_HEADERS, last_row)
    }

    /// Adds the per-year statistics sheet.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the sheet cannot be written.
    pub fn write_yearly(&mut self, rows: &[YearlyStats]) -> Result<(), ReportError> {
        let mut sheet = self.new_sheet(YEARLY_SHEET, YEARLY_HEADERS)?;

        let mut last_row = 0;
        for (row, stats) in (1..).zip(rows) {
            self.write_row(&mut sheet, row, &yearly_row(stats))?;
            last_row = row;
        }

        self.finish_sheet(sheet, YEARLY_HEADERS, last_row)
    }

    /// Adds the monthly trend sheet and its line chart.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the sheet or chart cannot be written.
    pub fn write_trends(&mut self, rows: &[MonthlyCount]) -> Result<(), ReportError> {
        let mut sheet = self.new_sheet(TRENDS_SHEET, TREND_HEADERS)?;

        let mut last_row = 0;
        for (row, month) in (1..).zip(rows) {
            self.write_row(&mut sheet, row, &trend_row(month))?;
            last_row = row;
        }

        if last_row > 0 {
            let mut chart = Chart::new(ChartType::Line);
            chart.title().set_name("Monthly Launch Trend");
            chart.x_axis().set_name("Month");
            chart.y_axis().set_name("Number of Launches");
            chart
                .add_series()
                .set_name((TRENDS_SHEET, 0, 1))
                .set_categories((TRENDS_SHEET, 1, 0, last_row, 0))
                .set_values((TRENDS_SHEET, 1, 1, last_row, 1));
            chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);
            sheet.insert_chart(1, 3, &chart)?;
        }

        self.finish_sheet(sheet, TREND_HEADERS, last_row)
    }

    /// Adds the provider ranking sheet and its column chart.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the sheet or chart cannot be written.
    pub fn write_providers(&mut self, rows: &[ProviderStats]) -> Result<(), ReportError> {
        let mut sheet = self.new_sheet(PROVIDERS_SHEET, PROVIDER_HEADERS)?;

        let mut last_row = 0;
        for (row, stats) in (1..).zip(rows) {
            self.write_row(&mut sheet, row, &provider_row(stats))?;
            last_row = row;
        }

        if last_row > 0 {
            let mut chart = Chart::new(ChartType::Column);
            chart.title().set_name("Top 10 Providers by Total Launches");
            chart.x_axis().set_name("Provider");
            chart.y_axis().set_name("Number of Launches");
            for col in [1, 2] {
                chart
                    .add_series()
                    .set_name((PROVIDERS_SHEET, 0, col))
                    .set_categories((PROVIDERS_SHEET, 1, 0, last_row, 0))
                    .set_values((PROVIDERS_SHEET, 1, col, last_row, col));
            }
            chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);
            sheet.insert_chart(1, 6, &chart)?;
        }

        self.finish_sheet(sheet, PROVIDER_HEADERS, last_row)
    }

    /// Adds the launch site ranking sheet and its pie chart.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the sheet or chart cannot be written.
    pub fn write_sites(&mut self, rows: &[SiteStats]) -> Result<(), ReportError> {
        let mut sheet = self.new_sheet(SITES_SHEET, SITE_HEADERS)?;

        let mut last_row = 0;
        for (row, stats) in (1..).zip(rows) {
            self.write_row(&mut sheet, row, &site_row(stats))?;
            last_row = row;
        }

        if last_row > 0 {
            let mut chart = Chart::new(ChartType::Pie);
            chart.title().set_name("Top 10 Launch Sites by Total Launches");
            chart
                .add_series()
                .set_name((SITES_SHEET, 0, 2))
                .set_categories((SITES_SHEET, 1, 0, last_row, 0))
                .set_values((SITES_SHEET, 1, 2, last_row, 2));
            chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);
            sheet.insert_chart(1, 6, &chart)?;
        }

        self.finish_sheet(sheet, SITE_HEADERS, last_row)
    }

    /// Writes the workbook to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the file cannot be created.
    pub fn save(&mut self, path: &Path) -> Result<(), ReportError> {
        self.workbook.save(path)?;
        log::info!("Excel file '{}' has been generated.", path.display());
        Ok(())
    }

    /// Serializes the workbook into memory.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Xlsx`] if the workbook cannot be assembled.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, ReportError> {
        Ok(self.workbook.save_to_buffer()?)
    }

    fn new_sheet(&self, name: &str, headers: &[&str]) -> Result<Worksheet, ReportError> {
        let mut sheet = Worksheet::new();
        sheet.set_name(name)?;
        for (col, header) in (0..).zip(headers) {
            sheet.write_string_with_format(0, col, *header, &self.styles.header)?;
        }
        Ok(sheet)
    }

    fn write_row(
        &self,
        sheet: &mut Worksheet,
        row: RowNum,
        cells: &[Cell<'_>],
    ) -> Result<(), ReportError> {
        for (col, cell) in (0..).zip(cells) {
            match cell {
                Cell::Text(text) => {
                    sheet.write_string_with_format(row, col, text.as_ref(), &self.styles.data)?;
                }
                Cell::Number(n) => {
                    sheet.write_number_with_format(row, col, *n, &self.styles.data)?;
                }
                Cell::Percent(ratio) => {
                    sheet.write_number_with_format(row, col, *ratio, &self.styles.percent)?;
                }
            }
        }
        Ok(())
    }

    /// Adds the banded table over rows `1..=last_row`, sizes the columns
    /// and hands the sheet to the workbook.
    fn finish_sheet(
        &mut self,
        mut sheet: Worksheet,
        headers: &[&str],
        last_row: RowNum,
    ) -> Result<(), ReportError> {
        if last_row > 0 {
            let columns: Vec<TableColumn> = headers
                .iter()
                .map(|header| {
                    TableColumn::new()
                        .set_header(*header)
                        .set_header_format(self.styles.header.clone())
                })
                .collect();
            let table = Table::new()
                .set_style(TableStyle::Medium2)
                .set_columns(&columns);
            let last_col = ColNum::try_from(headers.len().saturating_sub(1)).unwrap_or(0);
            sheet.add_table(0, 0, last_row, last_col, &table)?;
        }

        sheet.autofit();
        log::debug!(
            "Wrote sheet '{}' with {last_row} data rows",
            sheet.name()
        );
        self.workbook.push_worksheet(sheet);
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use launch_report_analytics::normalize_records;
    use launch_report_analytics::stats::aggregate;
    use launch_report_launch_models::LaunchRecord;

    use super::*;

    fn records() -> Vec<NormalizedLaunchRecord> {
        normalize_records(vec![
            LaunchRecord {
                name: "Falcon 9 Flight 1".to_string(),
                status: "Successful".to_string(),
                provider: "SpaceX".to_string(),
                rocket: "Falcon 9".to_string(),
                mission: "Test Mission".to_string(),
                date: "June 4, 2010 noon".to_string(),
                pad: "SLC-40".to_string(),
            },
            LaunchRecord {
                name: "Vostok 1".to_string(),
                status: "Launch Successful".to_string(),
                provider: "Soviet Space Program".to_string(),
                rocket: "Vostok-K".to_string(),
                mission: "Vostok 1".to_string(),
                date: "April 12, 1961, 6:07 a.m.".to_string(),
                pad: "Gagarin's Start".to_string(),
            },
            LaunchRecord {
                name: "Undated".to_string(),
                status: "Failure".to_string(),
                date: "TBD".to_string(),
                ..LaunchRecord::default()
            },
        ])
    }

    fn is_zip(bytes: &[u8]) -> bool {
        bytes.starts_with(b"PK")
    }

    fn part_names(bytes: &[u8]) -> Vec<String> {
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut contents = String::new();
        std::io::Read::read_to_string(&mut part, &mut contents).unwrap();
        contents
    }

    #[test]
    fn writes_full_report() {
        let records = records();
        let aggregates = aggregate(&records);
        let mut writer = ReportWriter::new();
        writer.write_report(&records, &aggregates).unwrap();
        let bytes = writer.save_to_buffer().unwrap();
        assert!(is_zip(&bytes));

        let parts = part_names(&bytes);
        for n in 1..=5 {
            let sheet = format!("xl/worksheets/sheet{n}.xml");
            assert!(parts.contains(&sheet), "{sheet} missing");
        }
        for n in 1..=3 {
            let chart = format!("xl/charts/chart{n}.xml");
            assert!(parts.contains(&chart), "{chart} missing");
        }
        assert!(!parts.iter().any(|p| p == "xl/charts/chart4.xml"));

        let strings = read_part(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains("2010-06-04 12:00"));
        assert!(strings.contains("1961-04-12 06:07"));
        assert!(!strings.contains("June 4, 2010 noon"));
    }

    #[test]
    fn empty_data_writes_header_only_sheets() {
        let mut writer = ReportWriter::new();
        writer
            .write_report(&[], &LaunchAggregates::default())
            .unwrap();
        let bytes = writer.save_to_buffer().unwrap();
        assert!(is_zip(&bytes));

        let parts = part_names(&bytes);
        assert!(parts.iter().any(|p| p == "xl/worksheets/sheet5.xml"));
        assert!(!parts.iter().any(|p| p.starts_with("xl/charts/")));
    }

    #[test]
    fn yearly_row_follows_header_order() {
        let stats = YearlyStats {
            year: 2010,
            successes: 3,
            total: 4,
            unique_providers: 2,
            unique_rockets: 1,
        };
        let row = yearly_row(&stats);
        assert_eq!(row.len(), YEARLY_HEADERS.len());
        assert_eq!(
            row,
            [
                Cell::Number(2010.0),
                Cell::Number(3.0),
                Cell::Number(4.0),
                Cell::Percent(0.75),
                Cell::Number(2.0),
                Cell::Number(1.0),
            ]
        );
        assert_eq!(YEARLY_HEADERS[3], "Success Rate");
    }

    #[test]
    fn ranking_rows_put_success_rate_fourth() {
        let provider = ProviderStats {
            provider: "SpaceX".to_string(),
            successes: 1,
            total: 2,
            unique_rockets: 1,
        };
        let row = provider_row(&provider);
        assert_eq!(row.len(), PROVIDER_HEADERS.len());
        assert_eq!(row[0], Cell::Text("SpaceX".into()));
        assert_eq!(row[3], Cell::Percent(0.5));

        let site = SiteStats {
            pad: "SLC-40".to_string(),
            successes: 0,
            total: 3,
            unique_providers: 2,
        };
        let row = site_row(&site);
        assert_eq!(row.len(), SITE_HEADERS.len());
        assert_eq!(row[3], Cell::Percent(0.0));
        assert_eq!(row[4], Cell::Number(2.0));
    }

    #[test]
    fn launch_row_uses_display_date() {
        let records = records();
        let row_for = |name: &str| {
            let launch = records.iter().find(|r| r.record.name == name).unwrap();
            launch_row(launch)
        };

        let falcon = row_for("Falcon 9 Flight 1");
        assert_eq!(falcon.len(), LAUNCH_HEADERS.len());
        assert_eq!(falcon[0], Cell::Text("Falcon 9 Flight 1".into()));
        assert_eq!(falcon[1], Cell::Text("2010-06-04 12:00".into()));
        assert_eq!(falcon[6], Cell::Text("SLC-40".into()));

        assert_eq!(row_for("Undated")[1], Cell::Text("".into()));
    }

    #[test]
    fn sheets_are_added_in_report_order() {
        let records = records();
        let aggregates = aggregate(&records);
        let mut writer = ReportWriter::new();
        writer.write_report(&records, &aggregates).unwrap();

        let names: Vec<String> = writer
            .workbook
            .worksheets()
            .iter()
            .map(Worksheet::name)
            .collect();
        assert_eq!(
            names,
            [
                LAUNCHES_SHEET,
                YEARLY_SHEET,
                TRENDS_SHEET,
                PROVIDERS_SHEET,
                SITES_SHEET
            ]
        );
    }
}
