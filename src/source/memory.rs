//! In-memory row source.

use crate::document::Row;
use crate::error::Result;
use crate::source::{RowSource, RowStream};

/// A row source over rows already held in memory.
///
/// Items are `Result`s so callers can reproduce a source that fails midway.
#[derive(Debug, Default)]
pub struct MemoryRowSource {
    rows: Vec<Result<Row>>,
}

impl MemoryRowSource {
    /// Create a source that yields every row successfully.
    pub fn new(rows: Vec<Row>) -> Self {
        MemoryRowSource {
            rows: rows.into_iter().map(Ok).collect(),
        }
    }

    /// Create a source from pre-built results, errors included.
    pub fn from_results(rows: Vec<Result<Row>>) -> Self {
        MemoryRowSource { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowSource for MemoryRowSource {
    fn scan<T, F>(self, consumer: F) -> Result<T>
    where
        F: FnOnce(RowStream<'_>) -> Result<T>,
    {
        consumer(Box::new(self.rows.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldValue;
    use crate::error::FtsError;

    #[test]
    fn test_yields_rows_in_order() {
        let source = MemoryRowSource::new(vec![vec!["a".into()], vec!["b".into()]]);
        assert_eq!(source.len(), 2);

        let rows: Vec<Row> = source
            .scan(|rows| rows.collect::<Result<Vec<_>>>())
            .unwrap();
        assert_eq!(rows[1], vec![FieldValue::from("b")]);
    }

    #[test]
    fn test_surfaces_errors() {
        let source = MemoryRowSource::from_results(vec![
            Ok(vec!["a".into()]),
            Err(FtsError::connection("socket closed")),
        ]);

        let result = source.scan(|rows| rows.collect::<Result<Vec<_>>>());
        assert!(matches!(result, Err(FtsError::Connection(_))));
    }
}
