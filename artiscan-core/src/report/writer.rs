//! Report persistence
//!
//! Reports are evidence: an existing file with the target name is never
//! overwritten or truncated.

use crate::error::{Error, Result};
use crate::types::ArtifactKind;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Writes rendered reports into an output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Where the report for `kind` goes
    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        self.output_dir.join(kind.output_file_name())
    }

    /// Fail early if the target already exists, before any extraction work.
    pub fn ensure_available(&self, kind: ArtifactKind) -> Result<PathBuf> {
        let path = self.path_for(kind);
        if path.exists() {
            return Err(Error::ReportExists(path));
        }
        Ok(path)
    }

    /// Create the report file and write `document` into it.
    pub fn write(&self, kind: ArtifactKind, document: &str) -> Result<PathBuf> {
        let path = self.write_with(kind, |file| {
            file.write_all(document.as_bytes())?;
            file.flush()
        })?;

        tracing::info!(path = %path.display(), bytes = document.len(), "Report saved");
        Ok(path)
    }

    /// Create the report file and fill it with `fill`.
    ///
    /// A file that could not be written completely is removed again, so a
    /// truncated report never blocks the next run.
    fn write_with<F>(&self, kind: ArtifactKind, fill: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut File) -> std::io::Result<()>,
    {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(kind);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(Error::ReportExists(path));
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = fill(&mut file) {
            drop(file);
            if let Err(cleanup) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial report");
            }
            return Err(e.into());
        }
        Ok(path)
    }
}
