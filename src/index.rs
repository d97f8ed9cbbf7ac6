//! In-memory inverted index.
//!
//! - [`posting`] - per-term posting lists with positions
//! - [`column`] - the term dictionary and length statistics of one column
//! - [`table`] - [`FtsTable`], the schema-bound table that owns the index
//!
//! [`FtsTable`]: table::FtsTable

pub mod column;
pub mod posting;
pub mod table;

pub use table::{FtsTable, LoadStats, TableState};
