#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal plumbing shared by `launch_scrape` and `launch_report`.
//!
//! [`init_logger`] installs the logger for both binaries. The scrape also
//! draws its page counter with [`IndicatifProgress`]; log lines printed
//! during the crawl are routed around that bar instead of tearing it.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use launch_report_scraper::progress::ProgressCallback;

pub use indicatif::MultiProgress;

/// Terminal page counter for the scrape driver.
pub struct IndicatifProgress {
    bar: ProgressBar,
    /// Counting style used once the number of pages is known.
    bar_style: ProgressStyle,
}

impl IndicatifProgress {
    /// Creates a progress bar for a page crawl. It starts as a spinner
    /// while the checkpoint is read and becomes a bar with an ETA once
    /// [`ProgressCallback::set_total()`] is called.
    #[must_use]
    pub fn pages_bar(multi: &MultiProgress, message: &str) -> Arc<dyn ProgressCallback> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());

        let bar_style = ProgressStyle::with_template(
            "  {msg} {wide_bar:.cyan/dim} {pos}/{len} pages {percent}% [{eta}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

        Arc::new(Self { bar, bar_style })
    }
}

impl ProgressCallback for IndicatifProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(self.bar_style.clone());
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}

/// Installs `pretty_env_logger` at `info` (`RUST_LOG` overrides it) behind
/// the `indicatif` bridge.
///
/// Any bar shown while logging must be added to the returned
/// [`MultiProgress`].
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok(); // already installed

    log::set_max_level(level);

    multi
}
