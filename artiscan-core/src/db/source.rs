//! Source database handle and query shape

use crate::error::{Error, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// One raw result row, columns in query order.
pub type RawRow = Vec<Value>;

/// A fixed SQL text plus the values bound to its `?` placeholders.
#[derive(Debug, Clone, Default)]
pub struct ArtifactQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl ArtifactQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: vec![],
        }
    }

    /// Append a SQL fragment and the values it binds.
    pub fn and(mut self, fragment: &str, params: impl IntoIterator<Item = Value>) -> Self {
        self.sql.push(' ');
        self.sql.push_str(fragment);
        self.params.extend(params);
        self
    }

    /// Append `AND <column> LIKE ?` for a substring, or nothing without one.
    pub fn and_contains(self, column: &str, substring: Option<&str>) -> Self {
        match substring {
            Some(s) => self.and(
                &format!("AND {} LIKE ? ESCAPE '\\'", column),
                [Value::Text(like_pattern(s))],
            ),
            None => self,
        }
    }

    /// Append a trailing clause (ORDER BY and the like).
    pub fn then(mut self, clause: &str) -> Self {
        self.sql.push(' ');
        self.sql.push_str(clause);
        self
    }
}

/// `LIKE` pattern matching `s` anywhere, with `%`, `_` and `\` in `s` taken literally.
pub fn like_pattern(s: &str) -> String {
    let mut pattern = String::with_capacity(s.len() + 2);
    pattern.push('%');
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Read-only handle on one evidence database.
///
/// The connection closes when the handle is dropped.
pub struct SourceDb {
    path: PathBuf,
    conn: Connection,
}

impl SourceDb {
    /// Open an existing database read-only.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DatabaseNotFound(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::access(path, e))?;

        tracing::debug!(path = %path.display(), "Opened source database read-only");

        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    /// Run a query and collect every row.
    pub fn query(&self, query: &ArtifactQuery) -> Result<Vec<RawRow>> {
        tracing::debug!(sql = %query.sql, params = query.params.len(), "Running query");

        let mut stmt = self
            .conn
            .prepare(&query.sql)
            .map_err(|e| Error::access(&self.path, e))?;
        let width = stmt.column_count();

        let rows = stmt
            .query_map(params_from_iter(query.params.iter()), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<RawRow>>()
            })
            .map_err(|e| Error::access(&self.path, e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::access(&self.path, e))?;

        tracing::debug!(rows = rows.len(), "Query complete");
        Ok(rows)
    }
}

/// Open `db_path`, run one query, close the handle.
pub fn query(db_path: &Path, query: &ArtifactQuery) -> Result<Vec<RawRow>> {
    SourceDb::open(db_path)?.query(query)
}
