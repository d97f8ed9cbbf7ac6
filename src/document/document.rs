//! Loaded documents.

use std::sync::Arc;

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};

use crate::document::field_value::FieldValue;

/// Identifier assigned to a document at load time, starting at 0.
pub type DocId = u64;

/// A row stored in a table, addressable by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    doc_id: DocId,
    columns: Arc<[String]>,
    values: Vec<FieldValue>,
}

impl Document {
    pub(crate) fn new(doc_id: DocId, columns: Arc<[String]>, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Document {
            doc_id,
            columns,
            values,
        }
    }

    pub fn doc_id(&self) -> DocId {
        self.doc_id
    }

    /// Get a field value by column name.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    /// Values in column order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

struct Fields<'a>(&'a Document);

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in self.0.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Document", 2)?;
        state.serialize_field("doc_id", &self.doc_id)?;
        state.serialize_field("fields", &Fields(self))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let columns: Arc<[String]> = vec!["title".to_string(), "body".to_string()].into();
        Document::new(7, columns, vec!["fox".into(), FieldValue::Null])
    }

    #[test]
    fn test_lookup_by_column() {
        let doc = sample();
        assert_eq!(doc.doc_id(), 7);
        assert_eq!(doc.get("title"), Some(&FieldValue::from("fox")));
        assert_eq!(doc.get("body"), Some(&FieldValue::Null));
        assert_eq!(doc.get("missing"), None);
        assert_eq!(doc.iter().map(|(c, _)| c).collect::<Vec<_>>(), vec!["title", "body"]);
    }

    #[test]
    fn test_serializes_fields_in_column_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"doc_id":7,"fields":{"title":"fox","body":null}}"#);
    }
}
