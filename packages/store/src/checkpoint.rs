//! Last-completed-page checkpoint.
//!
//! The checkpoint file holds a single integer: the last page whose records
//! were fully written to the sink. A missing or unreadable file means the
//! crawl starts from scratch.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::StoreError;

/// File-backed page checkpoint.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Creates a store backed by `path`. Nothing is read until [`load`].
    ///
    /// [`load`]: Self::load
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the checkpoint file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the last completed page, or `None` when the file is absent
    /// or does not hold a page number.
    #[must_use]
    pub fn load(&self) -> Option<u32> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!(
                    "Could not read checkpoint {}: {e}; starting fresh",
                    self.path.display()
                );
                return None;
            }
        };

        match contents.trim().parse::<u32>() {
            Ok(page) => Some(page),
            Err(e) => {
                log::warn!(
                    "Ignoring malformed checkpoint {} ({:?}): {e}",
                    self.path.display(),
                    contents.trim()
                );
                None
            }
        }
    }

    /// Overwrites the checkpoint with `page`.
    ///
    /// Writes a sibling temp file, syncs it, then renames it over the
    /// checkpoint so a crash never leaves a half-written number behind.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written or renamed.
    pub fn save(&self, page: u32) -> Result<(), StoreError> {
        let tmp = self.tmp_path();
        {
            let mut file = std::fs::File::create(&tmp)?;
            write!(file, "{page}")?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Updated {} with {page}", self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
