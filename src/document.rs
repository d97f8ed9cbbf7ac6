//! Documents and field values.
//!
//! - [`field_value::FieldValue`] - a single text or scalar cell
//! - [`document::Document`] - a loaded row, addressable by column name
//! - [`Row`] - the raw field tuple handed over by a row source

#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;

pub use document::{DocId, Document};
pub use field_value::FieldValue;

/// A raw row: one value per column, in schema order.
pub type Row = Vec<FieldValue>;
