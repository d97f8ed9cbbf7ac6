//! Caller-owned session holding full-text tables.
//!
//! Tables are addressed by [`TableHandle`]s returned from
//! [`Session::create_index`]. Dropping the session drops every table and
//! index it owns.
//!
//! ```
//! use ftsmachine::query::MatchType;
//! use ftsmachine::schema::TokenizerConfig;
//! use ftsmachine::session::Session;
//!
//! let mut session = Session::new();
//! let table = session
//!     .create_index(["title", "body"], TokenizerConfig::default())
//!     .unwrap();
//! session
//!     .load(table, vec![vec!["foobar".into(), "nothing here".into()]])
//!     .unwrap();
//!
//! let results = session
//!     .search(table, "foobar", "title", MatchType::TokenMatch, 5)
//!     .unwrap();
//! assert_eq!(results.doc_ids(), vec![0]);
//! ```

use std::fmt;

use serde::Serialize;

use crate::document::Row;
use crate::error::{FtsError, Result};
use crate::index::{FtsTable, LoadStats};
use crate::query::{MatchType, SearchQuery, SearchResults};
use crate::schema::{Schema, TokenizerConfig};
use crate::source::RowSource;

/// Opaque reference to a table owned by a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TableHandle(usize);

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table#{}", self.0)
    }
}

/// Owner of the tables created during one unit of work.
///
/// A session is not synchronized. Concurrent use needs an external lock,
/// e.g. `RwLock<Session>` with loads under the write guard.
#[derive(Debug, Default)]
pub struct Session {
    tables: Vec<FtsTable>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Create an empty table from column names and a tokenizer.
    pub fn create_index<I, S>(
        &mut self,
        columns: I,
        tokenizer: TokenizerConfig,
    ) -> Result<TableHandle>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = FtsTable::create_index(columns, tokenizer)?;
        Ok(self.insert(table))
    }

    /// Create an empty table from a validated schema.
    pub fn create_table(&mut self, schema: Schema) -> TableHandle {
        self.insert(FtsTable::create(schema))
    }

    fn insert(&mut self, table: FtsTable) -> TableHandle {
        self.tables.push(table);
        TableHandle(self.tables.len() - 1)
    }

    pub fn table(&self, handle: TableHandle) -> Option<&FtsTable> {
        self.tables.get(handle.0)
    }

    fn table_mut(&mut self, handle: TableHandle) -> Result<&mut FtsTable> {
        self.tables
            .get_mut(handle.0)
            .ok_or_else(|| FtsError::load(format!("unknown {handle}")))
    }

    /// Bulk load rows into a table.
    pub fn load<I>(&mut self, handle: TableHandle, rows: I) -> Result<LoadStats>
    where
        I: IntoIterator<Item = Row>,
    {
        self.table_mut(handle)?.load(rows)
    }

    /// Bulk load a table from a row source.
    pub fn load_from<S: RowSource>(
        &mut self,
        handle: TableHandle,
        source: S,
    ) -> Result<LoadStats> {
        self.table_mut(handle)?.load_from(source)
    }

    pub fn search(
        &self,
        handle: TableHandle,
        term: &str,
        column: &str,
        match_type: MatchType,
        limit: usize,
    ) -> Result<SearchResults> {
        self.lookup(handle)?.search(term, column, match_type, limit)
    }

    pub fn execute(&self, handle: TableHandle, query: &SearchQuery) -> Result<SearchResults> {
        self.lookup(handle)?.execute(query)
    }

    fn lookup(&self, handle: TableHandle) -> Result<&FtsTable> {
        self.table(handle)
            .ok_or_else(|| FtsError::query(format!("unknown {handle}")))
    }

    /// Number of tables in the session.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemoryRowSource;

    #[test]
    fn test_session_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
        assert_send_sync::<FtsTable>();
    }

    #[test]
    fn test_tables_are_independent() {
        let mut session = Session::new();
        let first = session
            .create_index(["body"], TokenizerConfig::default())
            .unwrap();
        let second = session.create_table(Schema::builder().column("body").build().unwrap());
        assert_ne!(first, second);

        session.load(first, vec![vec!["fox".into()]]).unwrap();
        session
            .load_from(second, MemoryRowSource::new(vec![vec!["dog".into()]]))
            .unwrap();

        let hits = session
            .search(first, "dog", "body", MatchType::TokenMatch, 5)
            .unwrap();
        assert!(hits.is_empty());
        let hits = session
            .execute(second, &SearchQuery::all_columns("dog"))
            .unwrap();
        assert_eq!(hits.doc_ids(), vec![0]);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_unknown_handle() {
        let mut session = Session::new();
        let handle = TableHandle(3);
        assert!(matches!(session.load(handle, Vec::new()), Err(FtsError::Load(_))));
        assert!(matches!(
            session.search(handle, "fox", "body", MatchType::TokenMatch, 5),
            Err(FtsError::Query(_))
        ));
        assert!(session.table(handle).is_none());
    }
}
