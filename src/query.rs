//! Structured search queries and their results.
//!
//! A [`SearchQuery`] names the term, the target column and a [`MatchType`].
//! Terms are literal values handed to the table's analyzer; no query
//! language is parsed and no query text is ever assembled from user input.
//!
//! ```
//! use ftsmachine::query::{MatchType, SearchQuery};
//!
//! let query = SearchQuery::new("body", "lazy dog")
//!     .with_match_type(MatchType::ExactPhrase)
//!     .with_limit(10);
//!
//! assert_eq!(query.column(), Some("body"));
//! assert_eq!(query.to_string(), r#"body : "lazy dog""#);
//! ```

pub mod collector;
pub(crate) mod matcher;
pub mod scorer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{DocId, Document};
use crate::error::{FtsError, Result};

pub use self::collector::TopDocsCollector;
pub use self::scorer::Bm25;

/// Number of hits returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 5;

/// How the query term is matched against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    /// Analyze the term; every resulting token must occur in the column.
    #[default]
    TokenMatch,
    /// Match every indexed token starting with the (unstemmed) term.
    PrefixMatch,
    /// Analyze the term; the tokens must occur at consecutive positions.
    ExactPhrase,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchType::TokenMatch => "token",
            MatchType::PrefixMatch => "prefix",
            MatchType::ExactPhrase => "phrase",
        };
        f.write_str(name)
    }
}

impl FromStr for MatchType {
    type Err = FtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" | "token-match" => Ok(MatchType::TokenMatch),
            "prefix" | "prefix-match" => Ok(MatchType::PrefixMatch),
            "phrase" | "exact-phrase" => Ok(MatchType::ExactPhrase),
            other => Err(FtsError::query(format!("unknown match type '{other}'"))),
        }
    }
}

/// A single search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    term: String,
    column: Option<String>,
    #[serde(default)]
    match_type: MatchType,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl SearchQuery {
    /// Search `term` in one column with token matching and the default limit.
    pub fn new<C: Into<String>, T: Into<String>>(column: C, term: T) -> Self {
        SearchQuery {
            term: term.into(),
            column: Some(column.into()),
            match_type: MatchType::default(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Search `term` in every column of the table.
    pub fn all_columns<T: Into<String>>(term: T) -> Self {
        SearchQuery {
            term: term.into(),
            column: None,
            match_type: MatchType::default(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Check the parts of the query that do not depend on a table.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(FtsError::query("limit must be greater than zero"));
        }
        if self.term.trim().is_empty() {
            return Err(FtsError::query("search term is empty"));
        }
        if self.column.as_deref().is_some_and(|c| c.is_empty()) {
            return Err(FtsError::query("column name is empty"));
        }
        Ok(())
    }
}

/// Renders the query in FTS5 match syntax, quoting the term as a string
/// literal. Used for logging only.
impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(column) = &self.column {
            write!(f, "{column} : ")?;
        }
        let literal = self.term.trim().trim_end_matches('*').replace('"', "\"\"");
        match self.match_type {
            MatchType::PrefixMatch => write!(f, "\"{literal}\" *"),
            MatchType::TokenMatch | MatchType::ExactPhrase => write!(f, "\"{literal}\""),
        }
    }
}

/// A search hit: a document and its relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// The document ID.
    pub doc_id: DocId,
    /// BM25 score; higher is more relevant.
    pub score: f32,
    /// The matching document.
    pub document: Document,
}

/// Search results, best hit first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    /// The search hits.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents, before the limit was applied.
    pub total_hits: u64,
    /// Maximum score in the results.
    pub max_score: f32,
}

impl SearchResults {
    pub fn empty() -> Self {
        SearchResults::default()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Document IDs in rank order.
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.hits.iter().map(|hit| hit.doc_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::new("body", "fox");
        assert_eq!(query.match_type(), MatchType::TokenMatch);
        assert_eq!(query.limit(), DEFAULT_LIMIT);
        assert!(query.validate().is_ok());

        let query = SearchQuery::all_columns("fox");
        assert_eq!(query.column(), None);
        assert_eq!(query.to_string(), "\"fox\"");
    }

    #[test]
    fn test_validate() {
        let zero = SearchQuery::new("body", "fox").with_limit(0);
        assert!(matches!(zero.validate(), Err(FtsError::Query(_))));

        let blank = SearchQuery::new("body", "   ");
        assert!(matches!(blank.validate(), Err(FtsError::Query(_))));

        let no_column = SearchQuery::new("", "fox");
        assert!(matches!(no_column.validate(), Err(FtsError::Query(_))));
    }

    #[test]
    fn test_display_escapes_quotes() {
        let query = SearchQuery::new("title", r#"say "hi""#);
        assert_eq!(query.to_string(), r#"title : "say ""hi""""#);

        let query = SearchQuery::new("title", "fo*").with_match_type(MatchType::PrefixMatch);
        assert_eq!(query.to_string(), r#"title : "fo" *"#);
    }

    #[test]
    fn test_match_type_from_str() {
        assert_eq!("token".parse::<MatchType>().unwrap(), MatchType::TokenMatch);
        assert_eq!("Prefix".parse::<MatchType>().unwrap(), MatchType::PrefixMatch);
        assert_eq!(
            "exact-phrase".parse::<MatchType>().unwrap(),
            MatchType::ExactPhrase
        );
        assert!("fuzzy".parse::<MatchType>().is_err());
    }

    #[test]
    fn test_query_from_json() {
        let query: SearchQuery =
            serde_json::from_str(r#"{"term":"fox","column":"body","match_type":"prefix-match"}"#)
                .unwrap();
        assert_eq!(query.match_type(), MatchType::PrefixMatch);
        assert_eq!(query.limit(), DEFAULT_LIMIT);
    }
}
