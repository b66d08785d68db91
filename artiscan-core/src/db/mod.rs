//! Read-only access to source databases
//!
//! Evidence databases are opened with `SQLITE_OPEN_READ_ONLY` and only ever
//! read. The accessor does not know what any column means: it runs one
//! parameterized query and hands back raw rows.

mod source;

pub use source::{like_pattern, query, ArtifactQuery, RawRow, SourceDb};
