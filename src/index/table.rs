//! Full-text table: schema, stored rows and the per-column inverted index.
//!
//! A table is created empty, loaded exactly once and then only read. Loading
//! is all-or-nothing: rows are analyzed into a staging index that replaces
//! the (empty) live one only when the whole input has been consumed.
//!
//! ```
//! use ftsmachine::index::FtsTable;
//! use ftsmachine::query::MatchType;
//! use ftsmachine::schema::TokenizerConfig;
//!
//! let mut table = FtsTable::create_index(["title", "body"], TokenizerConfig::default()).unwrap();
//! table
//!     .load(vec![
//!         vec!["fox jumps".into(), "over the lazy dog".into()],
//!         vec!["bar none".into(), "the fox ran".into()],
//!     ])
//!     .unwrap();
//!
//! let results = table.search("fox", "body", MatchType::TokenMatch, 5).unwrap();
//! assert_eq!(results.doc_ids(), vec![1]);
//! ```

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::Token;
use crate::document::{DocId, Document, FieldValue, Row};
use crate::error::{FtsError, Result};
use crate::index::column::{ColumnIndex, ColumnStats};
use crate::query::matcher::Matcher;
use crate::query::{MatchType, SearchHit, SearchQuery, SearchResults, TopDocsCollector};
use crate::schema::{Schema, TokenizerConfig};
use crate::source::RowSource;
use crate::source::table::Frame;

/// Lifecycle state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableState {
    /// Created, not loaded yet.
    Empty,
    /// Loaded; no further loads are accepted.
    Sealed,
    /// A load failed; the table holds no documents and must be rebuilt.
    Invalidated,
}

/// Outcome of a successful bulk load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Number of documents loaded.
    pub documents: u64,
    /// Tokens indexed per column, in schema order.
    pub tokens: Vec<u64>,
}

/// Statistics of one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    #[serde(flatten)]
    pub stats: ColumnStats,
}

/// Snapshot of a table's size and shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    pub state: TableState,
    pub documents: u64,
    pub tokenizer: String,
    pub columns: Vec<ColumnSummary>,
}

/// Rows and index built by a load that has not been committed yet.
struct Staged {
    documents: Vec<Row>,
    indexes: Vec<ColumnIndex>,
}

/// An in-memory full-text table.
///
/// Searching takes `&self` and loading `&mut self`; callers sharing a table
/// between threads wrap it in a lock.
#[derive(Debug)]
pub struct FtsTable {
    schema: Schema,
    columns: Arc<[String]>,
    analyzer: PipelineAnalyzer,
    prefix_analyzer: PipelineAnalyzer,
    state: TableState,
    documents: Vec<Row>,
    indexes: Vec<ColumnIndex>,
}

impl FtsTable {
    /// Create an empty table bound to `schema`.
    pub fn create(schema: Schema) -> Self {
        let tokenizer = schema.tokenizer();
        FtsTable {
            columns: schema.column_names().into(),
            analyzer: tokenizer.analyzer(),
            prefix_analyzer: tokenizer.prefix_analyzer(),
            state: TableState::Empty,
            documents: Vec::new(),
            indexes: vec![ColumnIndex::new(); schema.len()],
            schema,
        }
    }

    /// Validate the column list and create an empty table.
    pub fn create_index<I, S>(columns: I, tokenizer: TokenizerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let schema = Schema::new(columns, tokenizer)?;
        debug!(
            "Created table ({}) with tokenizer '{}'",
            schema.column_names().join(", "),
            tokenizer
        );
        Ok(FtsTable::create(schema))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Bulk load rows. See [`FtsTable::try_load`].
    pub fn load<I>(&mut self, rows: I) -> Result<LoadStats>
    where
        I: IntoIterator<Item = Row>,
    {
        self.try_load(rows.into_iter().map(Ok))
    }

    /// Bulk load a fallible row stream.
    ///
    /// Documents get IDs 0, 1, 2... in input order. The first error item,
    /// a row whose arity differs from the schema, or an analysis failure
    /// aborts the load: the table keeps zero documents and becomes
    /// [`TableState::Invalidated`]. Error items are returned unchanged. A
    /// table accepts one load; later calls fail with a load error.
    pub fn try_load<I>(&mut self, rows: I) -> Result<LoadStats>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        self.ensure_loadable()?;
        let staged = self.stage(rows);
        self.commit(staged)
    }

    /// Bulk load everything `source` yields. The source is released before
    /// this returns.
    pub fn load_from<S: RowSource>(&mut self, source: S) -> Result<LoadStats> {
        self.ensure_loadable()?;
        let staged = source.scan(|rows| self.stage(rows));
        self.commit(staged)
    }

    /// Bulk load a frame whose columns must equal the schema's, in order.
    pub fn load_frame(&mut self, frame: Frame) -> Result<LoadStats> {
        self.ensure_loadable()?;
        if frame.columns() != self.schema.column_names() {
            let error = FtsError::load(format!(
                "frame columns ({}) do not match table columns ({})",
                frame.columns().join(", "),
                self.schema.column_names().join(", ")
            ));
            return self.commit(Err(error));
        }
        self.try_load(frame.into_rows().into_iter().map(Ok))
    }

    fn ensure_loadable(&self) -> Result<()> {
        match self.state {
            TableState::Empty => Ok(()),
            TableState::Sealed => Err(FtsError::load("table already sealed")),
            TableState::Invalidated => Err(FtsError::load(
                "table was invalidated by a failed load and must be rebuilt",
            )),
        }
    }

    fn stage<I>(&self, rows: I) -> Result<Staged>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        let mut staged = Staged {
            documents: Vec::new(),
            indexes: vec![ColumnIndex::new(); self.schema.len()],
        };

        for row in rows {
            let row = row?;
            let doc_id = staged.documents.len() as DocId;
            if row.len() != self.schema.len() {
                return Err(FtsError::load(format!(
                    "row {doc_id} has {} fields but the table has {} columns",
                    row.len(),
                    self.schema.len()
                )));
            }

            for (index, value) in staged.indexes.iter_mut().zip(&row) {
                index.add_document(doc_id, self.tokens(doc_id, value)?);
            }
            staged.documents.push(row);
        }

        Ok(staged)
    }

    fn tokens(&self, doc_id: DocId, value: &FieldValue) -> Result<Vec<Token>> {
        let Some(text) = value.index_text() else {
            return Ok(Vec::new());
        };
        self.analyzer
            .analyze(&text)
            .map(|tokens| tokens.collect())
            .map_err(|e| FtsError::load(format!("cannot analyze row {doc_id}: {e}")))
    }

    fn commit(&mut self, staged: Result<Staged>) -> Result<LoadStats> {
        match staged {
            Ok(staged) => {
                self.documents = staged.documents;
                self.indexes = staged.indexes;
                self.state = TableState::Sealed;

                let stats = LoadStats {
                    documents: self.documents.len() as u64,
                    tokens: self.indexes.iter().map(ColumnIndex::total_tokens).collect(),
                };
                info!(
                    "Loaded {} documents ({} tokens)",
                    stats.documents,
                    stats.tokens.iter().sum::<u64>()
                );
                Ok(stats)
            }
            Err(e) => {
                self.state = TableState::Invalidated;
                warn!("Load aborted, table invalidated: {e}");
                Err(e)
            }
        }
    }

    /// Ranked search in one column.
    ///
    /// Fails with a query error for an unknown column, an empty or
    /// unsearchable term, or a zero limit. An empty, unloaded or invalidated
    /// table yields no hits.
    pub fn search(
        &self,
        term: &str,
        column: &str,
        match_type: MatchType,
        limit: usize,
    ) -> Result<SearchResults> {
        let query = SearchQuery::new(column, term)
            .with_match_type(match_type)
            .with_limit(limit);
        self.execute(&query)
    }

    /// Run a structured query.
    ///
    /// Without a column, every column is searched: each query token must
    /// occur in some column and per-column scores are added up.
    pub fn execute(&self, query: &SearchQuery) -> Result<SearchResults> {
        query.validate()?;

        let columns: Vec<&ColumnIndex> = match query.column() {
            Some(name) => {
                let position = self.schema.column_index(name).ok_or_else(|| {
                    FtsError::query(format!("no such column '{name}'"))
                })?;
                vec![&self.indexes[position]]
            }
            None => self.indexes.iter().collect(),
        };

        let matcher = Matcher::compile(query, &self.analyzer, &self.prefix_analyzer)?;
        if self.state != TableState::Sealed || self.documents.is_empty() {
            return Ok(SearchResults::empty());
        }

        let mut collector = TopDocsCollector::new(query.limit());
        for (doc_id, score) in matcher.score(&columns) {
            collector.collect(doc_id, score);
        }

        let total_hits = collector.total_hits();
        let hits: Vec<SearchHit> = collector
            .into_sorted_vec()
            .into_iter()
            .filter_map(|scored| {
                self.document(scored.doc_id).map(|document| SearchHit {
                    doc_id: scored.doc_id,
                    score: scored.score,
                    document,
                })
            })
            .collect();
        let max_score = hits.first().map(|hit| hit.score).unwrap_or_default();

        debug!(
            "Search {query} matched {total_hits} documents, returning {}",
            hits.len()
        );
        Ok(SearchResults {
            hits,
            total_hits,
            max_score,
        })
    }

    /// Get a loaded document.
    pub fn document(&self, doc_id: DocId) -> Option<Document> {
        let values = self.documents.get(usize::try_from(doc_id).ok()?)?;
        Some(Document::new(doc_id, Arc::clone(&self.columns), values.clone()))
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            state: self.state,
            documents: self.documents.len() as u64,
            tokenizer: self.analyzer.name().to_string(),
            columns: self
                .columns
                .iter()
                .zip(&self.indexes)
                .map(|(column, index)| ColumnSummary {
                    column: column.clone(),
                    stats: index.stats(),
                })
                .collect(),
        }
    }
}
