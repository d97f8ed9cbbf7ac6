//! Schema definition for full-text tables.
//!
//! A [`Schema`] fixes the ordered column set of a table and the
//! [`TokenizerConfig`] used to analyze every column. Both are immutable once
//! the table exists.
//!
//! # Examples
//!
//! ```
//! use ftsmachine::schema::{Schema, Segmentation, StemmerKind, TokenizerConfig};
//!
//! let schema = Schema::builder()
//!     .column("title")
//!     .column("body")
//!     .tokenizer(TokenizerConfig::new(StemmerKind::Porter, Segmentation::UnicodeWord))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.column_index("body"), Some(1));
//!
//! // The FTS5-style spelling is accepted as well.
//! let config: TokenizerConfig = "porter unicode61".parse().unwrap();
//! assert_eq!(config, schema.tokenizer());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::diacritic::DiacriticFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::{IdentityStemmer, PorterStemmer, StemFilter, Stemmer};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::byte::ByteTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::{FtsError, Result};

/// Stemming algorithm applied after segmentation and case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StemmerKind {
    /// Terms are indexed as they come out of the tokenizer.
    Identity,
    /// English Porter stemmer.
    #[default]
    Porter,
}

/// Text segmentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Segmentation {
    /// ASCII separators; non-ASCII bytes are word bytes; ASCII-only case folding.
    Byte,
    /// Unicode word boundaries (UAX #29) split at inner punctuation, with
    /// Unicode case folding and diacritic removal.
    #[default]
    UnicodeWord,
}

/// Tokenizer configuration of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TokenizerConfig {
    #[serde(default)]
    pub stemmer: StemmerKind,
    #[serde(default)]
    pub segmentation: Segmentation,
}

impl TokenizerConfig {
    pub fn new(stemmer: StemmerKind, segmentation: Segmentation) -> Self {
        TokenizerConfig {
            stemmer,
            segmentation,
        }
    }

    fn tokenizer(&self) -> Arc<dyn Tokenizer> {
        match self.segmentation {
            Segmentation::Byte => Arc::new(ByteTokenizer::new()),
            Segmentation::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        }
    }

    /// Case folding, plus diacritic removal for `unicode61`.
    fn folding(&self) -> Vec<Arc<dyn Filter>> {
        match self.segmentation {
            Segmentation::Byte => vec![Arc::new(LowercaseFilter::ascii())],
            Segmentation::UnicodeWord => vec![
                Arc::new(LowercaseFilter::new()),
                Arc::new(DiacriticFilter::new()),
            ],
        }
    }

    fn stemmer(&self) -> Box<dyn Stemmer> {
        match self.stemmer {
            StemmerKind::Identity => Box::new(IdentityStemmer::new()),
            StemmerKind::Porter => Box::new(PorterStemmer::new()),
        }
    }

    /// Build the analyzer used for indexing and for token/phrase queries.
    pub fn analyzer(&self) -> PipelineAnalyzer {
        self.folding()
            .into_iter()
            .fold(PipelineAnalyzer::new(self.tokenizer()), PipelineAnalyzer::add_filter)
            .add_filter(Arc::new(StemFilter::with_stemmer(self.stemmer())))
            .with_name(self.to_string())
    }

    /// Build the analyzer used for prefix queries: segmentation and folding only.
    pub fn prefix_analyzer(&self) -> PipelineAnalyzer {
        self.folding()
            .into_iter()
            .fold(PipelineAnalyzer::new(self.tokenizer()), PipelineAnalyzer::add_filter)
            .with_name(format!("{self} (prefix)"))
    }
}

impl fmt::Display for TokenizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segmenter = match self.segmentation {
            Segmentation::Byte => "ascii",
            Segmentation::UnicodeWord => "unicode61",
        };
        match self.stemmer {
            StemmerKind::Porter => write!(f, "porter {segmenter}"),
            StemmerKind::Identity => write!(f, "{segmenter}"),
        }
    }
}

impl FromStr for TokenizerConfig {
    type Err = FtsError;

    /// Parse the FTS5-style form, e.g. `porter unicode61` or `ascii`.
    fn from_str(s: &str) -> Result<Self> {
        let mut stemmer = None;
        let mut segmentation = None;

        for word in s.split_whitespace() {
            match word.to_ascii_lowercase().as_str() {
                "porter" | "identity" if stemmer.is_some() => {
                    return Err(FtsError::schema(format!(
                        "tokenizer '{s}' names more than one stemmer"
                    )));
                }
                "porter" => stemmer = Some(StemmerKind::Porter),
                "identity" => stemmer = Some(StemmerKind::Identity),
                "unicode61" | "unicode-word" | "ascii" | "byte" if segmentation.is_some() => {
                    return Err(FtsError::schema(format!(
                        "tokenizer '{s}' names more than one segmenter"
                    )));
                }
                "unicode61" | "unicode-word" => segmentation = Some(Segmentation::UnicodeWord),
                "ascii" | "byte" => segmentation = Some(Segmentation::Byte),
                other => {
                    return Err(FtsError::schema(format!(
                        "unsupported tokenizer option '{other}'"
                    )));
                }
            }
        }

        match (stemmer, segmentation) {
            (_, Some(segmentation)) => Ok(TokenizerConfig {
                stemmer: stemmer.unwrap_or(StemmerKind::Identity),
                segmentation,
            }),
            (Some(_), None) => Err(FtsError::schema(format!(
                "tokenizer '{s}' has a stemmer but no segmenter"
            ))),
            (None, None) => Err(FtsError::schema("tokenizer configuration is empty")),
        }
    }
}

#[derive(Deserialize)]
struct SchemaDef {
    columns: Vec<String>,
    #[serde(default)]
    tokenizer: TokenizerConfig,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = FtsError;

    fn try_from(def: SchemaDef) -> Result<Self> {
        Schema::new(def.columns, def.tokenizer)
    }
}

/// The column set and tokenizer of a full-text table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct Schema {
    columns: Vec<String>,
    tokenizer: TokenizerConfig,
}

impl Schema {
    /// Create a schema from an ordered list of column names.
    ///
    /// Fails with a schema error when the list is empty, a name is empty or
    /// blank, or a name appears twice.
    pub fn new<I, S>(columns: I, tokenizer: TokenizerConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(FtsError::schema("a table needs at least one column"));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(FtsError::schema(format!(
                    "column {position} has an empty name"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(FtsError::schema(format!("duplicate column '{name}'")));
            }
        }

        Ok(Schema { columns, tokenizer })
    }

    /// Start building a schema column by column.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column, if the table has it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn tokenizer(&self) -> TokenizerConfig {
        self.tokenizer
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    columns: Vec<String>,
    tokenizer: TokenizerConfig,
}

impl SchemaBuilder {
    /// Append a column.
    pub fn column<S: Into<String>>(mut self, name: S) -> Self {
        self.columns.push(name.into());
        self
    }

    /// Set the tokenizer configuration (default: porter + unicode words).
    pub fn tokenizer(mut self, tokenizer: TokenizerConfig) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<Schema> {
        Schema::new(self.columns, self.tokenizer)
    }
}
