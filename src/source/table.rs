//! Table builder: assembles a row source into a named-column frame.
//!
//! ```
//! use ftsmachine::document::FieldValue;
//! use ftsmachine::source::memory::MemoryRowSource;
//! use ftsmachine::source::table::TableBuilder;
//!
//! let source = MemoryRowSource::new(vec![vec!["fox".into(), "dog".into()]]);
//! let frame = TableBuilder::new(["title", "body"]).build(source).unwrap();
//!
//! assert_eq!(frame.len(), 1);
//! assert_eq!(frame.column("body").unwrap()[0], &FieldValue::from("dog"));
//! ```

use log::debug;

use crate::document::{FieldValue, Row};
use crate::error::{FtsError, Result};
use crate::source::RowSource;

/// A materialized table: rows × named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Frame {
    /// Build a frame from rows that are already in memory.
    ///
    /// Fails with a build error if a row's arity differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(arity_error(index, row.len(), columns.len()));
        }
        Ok(Frame { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&FieldValue>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the frame, returning its rows for loading.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

fn arity_error(index: usize, found: usize, expected: usize) -> FtsError {
    FtsError::build(format!(
        "row {index} has {found} fields but the table has {expected} columns"
    ))
}

/// Collects the rows of a [`RowSource`] under a list of column names.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    columns: Vec<String>,
}

impl TableBuilder {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableBuilder {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Drain `source` into a frame.
    ///
    /// Connection errors from the source are returned unchanged; a row whose
    /// arity differs from the column list is a build error.
    pub fn build<S: RowSource>(self, source: S) -> Result<Frame> {
        let expected = self.columns.len();
        let rows = source.scan(|rows| {
            let mut collected = Vec::new();
            for (index, row) in rows.enumerate() {
                let row = row?;
                if row.len() != expected {
                    return Err(arity_error(index, row.len(), expected));
                }
                collected.push(row);
            }
            Ok(collected)
        })?;

        debug!("Built frame with {} rows x {} columns", rows.len(), expected);
        Ok(Frame {
            columns: self.columns,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemoryRowSource;

    #[test]
    fn test_build_frame() {
        let source = MemoryRowSource::new(vec![
            vec!["fox jumps".into(), "over the lazy dog".into()],
            vec!["bar none".into(), "the fox ran".into()],
        ]);
        let frame = TableBuilder::new(["title", "body"]).build(source).unwrap();

        assert_eq!(frame.columns(), &["title", "body"]);
        assert_eq!(frame.len(), 2);
        assert_eq!(
            frame.column("title").unwrap(),
            vec![&FieldValue::from("fox jumps"), &FieldValue::from("bar none")]
        );
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn test_arity_mismatch_is_build_error() {
        let source = MemoryRowSource::new(vec![vec!["only one".into()]]);
        let result = TableBuilder::new(["title", "body"]).build(source);
        assert!(matches!(result, Err(FtsError::Build(_))));

        let result = Frame::new(vec!["a".into()], vec![vec![], vec!["x".into()]]);
        assert!(matches!(result, Err(FtsError::Build(_))));
    }

    #[test]
    fn test_connection_error_propagates() {
        let source = MemoryRowSource::from_results(vec![
            Ok(vec!["a".into()]),
            Err(FtsError::connection("cursor lost")),
        ]);
        let result = TableBuilder::new(["title"]).build(source);
        assert!(matches!(result, Err(FtsError::Connection(_))));
    }
}
