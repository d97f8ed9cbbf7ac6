//! # ftsmachine
//!
//! In-memory full-text search over rows loaded from a relational source.
//!
//! Rows flow from a [`source::RowSource`] through the bulk loader into an
//! [`index::FtsTable`], which answers BM25-ranked queries afterwards.
//!
//! ## Features
//!
//! - Porter stemming and Unicode or ASCII word segmentation
//! - All-or-nothing bulk loading with per-column inverted indexes
//! - Token, prefix and phrase matching
//! - SQLite row source
//!
//! ```
//! use ftsmachine::query::{MatchType, SearchQuery};
//! use ftsmachine::schema::TokenizerConfig;
//! use ftsmachine::session::Session;
//!
//! let mut session = Session::new();
//! let table = session
//!     .create_index(["title", "body"], TokenizerConfig::default())
//!     .unwrap();
//! session
//!     .load(
//!         table,
//!         vec![
//!             vec!["fox jumps".into(), "over the lazy dog".into()],
//!             vec!["bar none".into(), "the fox ran".into()],
//!             vec!["foobar".into(), "nothing here".into()],
//!         ],
//!     )
//!     .unwrap();
//!
//! let hits = session.execute(table, &SearchQuery::all_columns("fox")).unwrap();
//! assert_eq!(hits.doc_ids(), vec![1, 0]);
//!
//! let hits = session.search(table, "fox", "body", MatchType::TokenMatch, 5).unwrap();
//! assert_eq!(hits.doc_ids(), vec![1]);
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod schema;
pub mod session;
pub mod source;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
