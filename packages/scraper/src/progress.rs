//! Page-crawl progress.
//!
//! The scrape driver reports through [`ProgressCallback`] once per listing
//! page. The CLI renders it as a terminal bar; tests pass
//! [`null_progress`].

use std::sync::Arc;

/// Receives page-crawl progress from the scrape driver.
pub trait ProgressCallback: Send + Sync {
    /// Number of pages this run will visit, known once the start page is
    /// resolved from the checkpoint.
    fn set_total(&self, total: u64);

    /// Marks `delta` more pages as visited.
    fn inc(&self, delta: u64);

    /// Names the page currently being fetched.
    fn set_message(&self, msg: String);

    /// Ends the crawl with a closing line, whether it completed or stopped.
    fn finish(&self, msg: String);
}

/// Discards every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// A shared [`NullProgress`] for runs without a terminal.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
