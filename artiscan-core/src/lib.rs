//! # artiscan-core
//!
//! Core library for artiscan - a forensic artifact extractor for Chrome,
//! Skype and WhatsApp SQLite databases.
//!
//! This library provides:
//! - Domain types for artifact kinds, time ranges, filters and records
//! - Read-only database access with parameterized queries
//! - One extractor per artifact type
//! - HTML report rendering and no-overwrite report output
//! - Configuration and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three stages:
//! - **Source:** the evidence database, opened read-only and never modified
//! - **Records:** normalized text cells (UTC timestamps, translated codes)
//! - **Report:** a rendered HTML document written to a fresh file
//!
//! ## Example
//!
//! ```rust,no_run
//! use artiscan_core::{scan, ArtifactKind, ExtractRequest, ReportWriter, TemplateEngine};
//!
//! let request = ExtractRequest::new("evidence/History");
//! let engine = TemplateEngine::new().expect("failed to load template");
//! let writer = ReportWriter::new("reports");
//!
//! let outcome = scan(ArtifactKind::ChromeHistory, &request, &engine, &writer)
//!     .expect("scan failed");
//! println!("{} records -> {}", outcome.record_count, outcome.path.display());
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use extract::ArtifactExtractor;
pub use report::{Report, ReportWriter, TemplateEngine};
pub use types::*;

// Public modules
pub mod codes;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod logging;
pub mod report;
pub mod timestamp;
pub mod types;
pub mod value;

use std::path::PathBuf;

/// Result of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub path: PathBuf,
    pub record_count: usize,
}

/// Extract one artifact type, render it, and save the report.
///
/// The output name is checked before the database is touched, so a
/// pre-existing report fails fast. Nothing is written on any error.
pub fn scan(
    kind: ArtifactKind,
    request: &ExtractRequest,
    engine: &TemplateEngine,
    writer: &ReportWriter,
) -> Result<ScanOutcome> {
    writer.ensure_available(kind)?;

    let report = extract::extract(kind, request)?;
    let html = engine.render_html(&report)?;
    let path = writer.write(kind, &html)?;

    Ok(ScanOutcome {
        path,
        record_count: report.record_count,
    })
}
