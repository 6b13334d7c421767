#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Durable storage for launch scrapes.
//!
//! [`csv_sink::CsvSink`] holds the accumulated launch rows and
//! [`checkpoint::CheckpointStore`] remembers the last page that was fully
//! written to it. Both are plain files so a crawl can be resumed after the
//! process dies.

pub mod checkpoint;
pub mod csv_sink;

/// Default path of the accumulated launch table.
pub const DEFAULT_CSV_PATH: &str = "space_launches.csv";

/// Default path of the page checkpoint.
pub const DEFAULT_CHECKPOINT_PATH: &str = "last_page.txt";

/// Errors that can occur while reading or writing scrape storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Returns a fresh, empty directory under the system temp dir.
    pub fn temp_dir(name: &str) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "launch_report_store_{name}_{}_{n}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
