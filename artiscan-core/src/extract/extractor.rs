//! Extractor trait abstraction
//!
//! Every artifact type implements [`ArtifactExtractor`]: it owns one query
//! shape, one column layout, and the row-to-record transformation.
//!
//! ## Design Principles
//!
//! 1. **Read-only**: source databases are opened read-only and closed before rendering
//! 2. **Field-level resilience**: bad values become `"Not Applicable"` / `"Unknown"` cells
//! 3. **File-level strictness**: any database error aborts the run, no partial report
//! 4. **Bound filters**: time bounds and substrings are always query parameters

use crate::db::{ArtifactQuery, RawRow, SourceDb};
use crate::error::Result;
use crate::report::Report;
use crate::timestamp::Epoch;
use crate::types::{ArtifactKind, ArtifactRecord, ExtractRequest, TimeRange};
use rusqlite::types::Value;
use std::path::PathBuf;

/// Trait implemented by all artifact extractors.
///
/// ## Example
///
/// ```rust,no_run
/// use artiscan_core::extract::{extractor_for, ArtifactExtractor};
/// use artiscan_core::{ArtifactKind, ExtractRequest};
///
/// let extractor = extractor_for(ArtifactKind::ChromeCookies);
/// let report = extractor.extract(&ExtractRequest::new("Cookies")).unwrap();
/// println!("{} cookies", report.record_count);
/// ```
pub trait ArtifactExtractor {
    /// Which artifact type this extractor produces
    fn kind(&self) -> ArtifactKind;

    /// Column headers, in cell order
    fn columns(&self) -> &'static [&'static str];

    /// The fixed query for this artifact type with the request's filters bound
    fn query(&self, request: &ExtractRequest) -> ArtifactQuery;

    /// Run the query and transform every row.
    ///
    /// Rows may be dropped only when they are not user content (system markers).
    fn records(&self, request: &ExtractRequest) -> Result<Vec<ArtifactRecord>>;

    /// Databases the records are drawn from, primary first.
    fn source_paths(&self, request: &ExtractRequest) -> Vec<PathBuf> {
        vec![request.db_path.clone()]
    }

    /// Extract and assemble a report stamped with the current time.
    fn extract(&self, request: &ExtractRequest) -> Result<Report> {
        let kind = self.kind();
        tracing::info!(
            artifact = %kind,
            db = %request.db_path.display(),
            min = request.time_range.min,
            max = request.time_range.max,
            filter = request.filter.substring().unwrap_or(""),
            "Extracting artifacts"
        );

        let records = self.records(request)?;
        tracing::info!(artifact = %kind, records = records.len(), "Extraction complete");

        self.source_paths(request).iter().try_fold(
            Report::assemble(kind.report_title(), self.columns(), records)?,
            |report, path| report.with_source(path),
        )
    }
}

/// Open the request's database, run `query`, and map every row.
pub(crate) fn map_rows<F>(request: &ExtractRequest, query: &ArtifactQuery, f: F) -> Result<Vec<ArtifactRecord>>
where
    F: FnMut(&RawRow) -> Option<ArtifactRecord>,
{
    let rows = SourceDb::open(&request.db_path)?.query(query)?;
    Ok(rows.iter().filter_map(f).collect())
}

/// `AND <column> >= ? AND <column> <= ?` with the range converted to native units.
pub(crate) fn within(query: ArtifactQuery, column: &str, range: &TimeRange, epoch: Epoch) -> ArtifactQuery {
    query.and(
        &format!("AND {column} >= ? AND {column} <= ?"),
        [
            Value::Integer(epoch.from_unix_seconds(range.min)),
            Value::Integer(epoch.from_unix_seconds(range.max)),
        ],
    )
}

static NULL: Value = Value::Null;

/// Column `i` of a row, `Null` when the row is shorter than expected.
pub(crate) fn col(row: &RawRow, i: usize) -> &Value {
    row.get(i).unwrap_or(&NULL)
}
