//! Report assembly, rendering and output
//!
//! ```text
//! records ──► Report::assemble ──► TemplateEngine (tera) ──► ReportWriter
//!                                   report.html                create-new only
//! ```
//!
//! A [`Report`] is built once per run and never changes afterwards.

mod template;
mod writer;

pub use template::TemplateEngine;
pub use writer::ReportWriter;

use crate::error::{Error, Result};
use crate::types::ArtifactRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;

/// A database the report was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub path: String,
    /// Hex SHA-256 of the database file at extraction time
    pub sha256: String,
}

impl SourceInfo {
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let mut hasher = Sha256::new();
        std::io::copy(&mut file, &mut hasher)?;
        Ok(Self {
            path: path.display().to_string(),
            sha256: hex::encode(hasher.finalize()),
        })
    }
}

/// A finished, immutable report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub columns: Vec<String>,
    pub records: Vec<ArtifactRecord>,
    /// Every database read, primary first
    pub sources: Vec<SourceInfo>,
}

impl Report {
    /// Assemble a report stamped with the current time.
    pub fn assemble(
        title: &str,
        columns: &[&str],
        records: Vec<ArtifactRecord>,
    ) -> Result<Self> {
        Self::assemble_at(title, columns, records, Utc::now())
    }

    /// Assemble a report with an explicit generation time.
    ///
    /// Fails if any record's width differs from `columns`.
    pub fn assemble_at(
        title: &str,
        columns: &[&str],
        records: Vec<ArtifactRecord>,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(Error::InconsistentColumns {
                index,
                expected: columns.len(),
                found: record.len(),
            });
        }

        Ok(Self {
            title: title.to_string(),
            generated_at,
            record_count: records.len(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records,
            sources: Vec::new(),
        })
    }

    /// Record a source database path and digest in the report header.
    pub fn with_source(mut self, path: &Path) -> Result<Self> {
        self.sources.push(SourceInfo::from_file(path)?);
        Ok(self)
    }
}
