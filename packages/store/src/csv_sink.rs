//! Delimited launch table.
//!
//! Records are written in [`LaunchRecord::FIELDS`] order under a single
//! header row. The sink never deduplicates: replaying a page simply appends
//! its rows again.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use launch_report_launch_models::LaunchRecord;

use crate::StoreError;

/// How a write treats existing file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum WriteMode {
    /// Truncate the file and start with a fresh header.
    Overwrite,
    /// Add rows to the end, writing a header only if the file is new.
    Append,
}

/// File-backed CSV sink for launch records.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the CSV file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `launches` in `mode` and syncs the file before returning.
    ///
    /// A header row is written when the file did not exist yet or when
    /// `mode` is [`WriteMode::Overwrite`]. Returns the number of rows
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be opened, encoded or
    /// flushed. Rows written before the failure may remain in the file.
    pub fn write(&self, launches: &[LaunchRecord], mode: WriteMode) -> Result<usize, StoreError> {
        let file_exists = self.path.is_file();
        log::info!(
            "Saving {} launches to {} in {mode} mode",
            launches.len(),
            self.path.display()
        );

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        let file = options.open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !file_exists || mode == WriteMode::Overwrite {
            writer.write_record(LaunchRecord::FIELDS)?;
            log::debug!("Wrote header to CSV file");
        }

        for launch in launches {
            writer.serialize(launch)?;
        }

        let file = writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))?;
        file.sync_all()?;

        log::info!("Successfully saved data to {}", self.path.display());
        Ok(launches.len())
    }

    /// Reads every launch back from the file, in file order.
    ///
    /// Rows that cannot be decoded are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be opened or its header
    /// row cannot be read.
    pub fn read_all(&self) -> Result<Vec<LaunchRecord>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        reader.headers()?;

        let mut launches = Vec::new();
        for (index, result) in reader.deserialize::<LaunchRecord>().enumerate() {
            match result {
                Ok(launch) => launches.push(launch),
                Err(e) => log::warn!(
                    "Skipping unreadable row {} in {}: {e}",
                    index + 2,
                    self.path.display()
                ),
            }
        }

        log::info!(
            "Read {} launches from {}",
            launches.len(),
            self.path.display()
        );
        Ok(launches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_dir;

    fn launch(name: &str) -> LaunchRecord {
        LaunchRecord {
            name: name.to_string(),
            status: "Successful".to_string(),
            provider: "SpaceX".to_string(),
            rocket: "Falcon 9".to_string(),
            mission: "Test, with comma".to_string(),
            date: "June 4, 2010 noon".to_string(),
            pad: "SLC-40".to_string(),
        }
    }

    fn header_count(path: &Path) -> usize {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter(|line| *line == "name,status,provider,rocket,mission,date,pad")
            .count()
    }

    #[test]
    fn new_file_gets_header_in_append_mode() {
        let dir = temp_dir("sink_new_append");
        let sink = CsvSink::new(dir.join("space_launches.csv"));
        sink.write(&[launch("A")], WriteMode::Append).unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        assert!(contents.starts_with("name,status,provider,rocket,mission,date,pad\n"));
        assert_eq!(header_count(sink.path()), 1);
    }

    #[test]
    fn append_keeps_single_header() {
        let dir = temp_dir("sink_append");
        let sink = CsvSink::new(dir.join("space_launches.csv"));
        sink.write(&[launch("A")], WriteMode::Overwrite).unwrap();
        sink.write(&[launch("B"), launch("C")], WriteMode::Append)
            .unwrap();

        assert_eq!(header_count(sink.path()), 1);
        let names: Vec<String> = sink.read_all().unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn overwrite_truncates_previous_rows() {
        let dir = temp_dir("sink_overwrite");
        let sink = CsvSink::new(dir.join("space_launches.csv"));
        sink.write(&[launch("A"), launch("B")], WriteMode::Append)
            .unwrap();
        sink.write(&[launch("C")], WriteMode::Overwrite).unwrap();

        let names: Vec<String> = sink.read_all().unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["C"]);
        assert_eq!(header_count(sink.path()), 1);
    }

    #[test]
    fn replayed_page_appends_duplicates() {
        let dir = temp_dir("sink_replay");
        let sink = CsvSink::new(dir.join("space_launches.csv"));
        let page = [launch("A"), launch("B")];
        sink.write(&page, WriteMode::Overwrite).unwrap();
        sink.write(&page, WriteMode::Append).unwrap();

        assert_eq!(sink.read_all().unwrap().len(), 4);
    }

    #[test]
    fn round_trips_quoted_fields() {
        let dir = temp_dir("sink_quoted");
        let sink = CsvSink::new(dir.join("space_launches.csv"));
        sink.write(&[launch("A")], WriteMode::Overwrite).unwrap();
        assert_eq!(sink.read_all().unwrap(), vec![launch("A")]);
    }

    #[test]
    fn skips_short_rows_when_reading() {
        let dir = temp_dir("sink_short_rows");
        let path = dir.join("space_launches.csv");
        std::fs::write(
            &path,
            "name,status,provider,rocket,mission,date,pad\n\
             A,Successful,SpaceX,Falcon 9,M,\"June 4, 2010\",SLC-40\n\
             B,Failure\n",
        )
        .unwrap();
        let launches = CsvSink::new(path).read_all().unwrap();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].date, "June 4, 2010");
    }

    #[test]
    fn missing_file_is_an_error_when_reading() {
        let dir = temp_dir("sink_missing");
        assert!(CsvSink::new(dir.join("nope.csv")).read_all().is_err());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = temp_dir("sink_bad_dir");
        let sink = CsvSink::new(dir.join("missing").join("space_launches.csv"));
        assert!(sink.write(&[launch("A")], WriteMode::Append).is_err());
    }
}
