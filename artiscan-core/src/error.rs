//! Error types for artiscan-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the artiscan-core library
///
/// Only file-level and configuration-level problems surface here. Bad field
/// values inside a row never become errors; they are rendered as
/// `"Not Applicable"` or `"Unknown"` cells instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Database file does not exist
    #[error("database not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    /// Database could not be opened or queried (corrupt file, schema mismatch, ...)
    #[error("error reading the database {}: {source}", path.display())]
    DatabaseAccess {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report target already exists; prior evidence is never overwritten
    #[error("{} already exists! Rename or move that file to avoid losing your data", .0.display())]
    ReportExists(PathBuf),

    /// Template loading or rendering error
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// JSON error while building the template context
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Artifact selector is not one of the supported kinds
    #[error("unrecognized artifact type: {0}")]
    UnknownArtifact(String),

    /// Time argument is not in `YYYY_MM_DD_HH_MM_SS` form
    #[error("invalid time argument {0:?}, expected YYYY_MM_DD_HH_MM_SS")]
    InvalidTimeArgument(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A record's width does not match the report's column headers
    #[error("record {index} has {found} cells, expected {expected}")]
    InconsistentColumns {
        index: usize,
        expected: usize,
        found: usize,
    },
}

impl Error {
    /// Wrap a rusqlite error with the database path it came from.
    pub fn access(path: impl Into<PathBuf>, source: rusqlite::Error) -> Self {
        Error::DatabaseAccess {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for artiscan-core
pub type Result<T> = std::result::Result<T, Error>;
