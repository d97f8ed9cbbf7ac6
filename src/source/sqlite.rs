//! SQLite row source.
//!
//! Rows are read through a prepared statement with bound parameters; the
//! statement text is never assembled from caller values. The connection is
//! opened read-only inside [`RowSource::scan`] and dropped before `scan`
//! returns, so it is closed on every exit path and only if it was opened.

use std::path::{Path, PathBuf};

use log::debug;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, OpenFlags, ToSql, params_from_iter};

use crate::document::{FieldValue, Row};
use crate::error::{FtsError, Result};
use crate::source::{RowSource, RowStream};

impl From<ValueRef<'_>> for FieldValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => FieldValue::Null,
            ValueRef::Integer(i) => FieldValue::Integer(i),
            ValueRef::Real(f) => FieldValue::Float(f),
            ValueRef::Text(bytes) => FieldValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => FieldValue::Binary(bytes.to_vec()),
        }
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            FieldValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            FieldValue::Boolean(b) => ToSqlOutput::Borrowed(ValueRef::Integer(i64::from(*b))),
            FieldValue::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            FieldValue::Float(f) => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            FieldValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            FieldValue::Binary(data) => ToSqlOutput::Borrowed(ValueRef::Blob(data)),
        })
    }
}

/// Reads the rows of one SQL query from an SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteRowSource {
    path: PathBuf,
    query: String,
    params: Vec<FieldValue>,
}

impl SqliteRowSource {
    /// Create a source for `query` against the database at `path`.
    pub fn new<P: AsRef<Path>, S: Into<String>>(path: P, query: S) -> Self {
        SqliteRowSource {
            path: path.as_ref().to_path_buf(),
            query: query.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter (`?`) of the query.
    pub fn bind<V: Into<FieldValue>>(mut self, value: V) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Names of the columns the query produces.
    pub fn column_names(&self) -> Result<Vec<String>> {
        let conn = self.open()?;
        let stmt = conn.prepare(&self.query)?;
        Ok(stmt.column_names().into_iter().map(String::from).collect())
    }

    fn open(&self) -> Result<Connection> {
        // Read-only and without SQLITE_OPEN_CREATE: a missing file is an
        // error, not an empty database.
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| {
                FtsError::connection(format!("failed to open {}: {e}", self.path.display()))
            })?;
        debug!("Connection to {} is opened", self.path.display());
        Ok(conn)
    }

    fn read<T, F>(&self, conn: &Connection, consumer: F) -> Result<T>
    where
        F: FnOnce(RowStream<'_>) -> Result<T>,
    {
        let mut stmt = conn.prepare(&self.query)?;
        let column_count = stmt.column_count();
        let rows = stmt.query_map(params_from_iter(self.params.iter()), move |row| {
            (0..column_count)
                .map(|i| row.get_ref(i).map(FieldValue::from))
                .collect::<rusqlite::Result<Row>>()
        })?;

        consumer(Box::new(rows.map(|row| row.map_err(FtsError::from))))
    }
}

impl RowSource for SqliteRowSource {
    fn scan<T, F>(self, consumer: F) -> Result<T>
    where
        F: FnOnce(RowStream<'_>) -> Result<T>,
    {
        let conn = self.open()?;
        let result = self.read(&conn, consumer);
        drop(conn);
        debug!("Connection to {} is closed", self.path.display());
        result
    }
}
