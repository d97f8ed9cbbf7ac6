//! Per-column term dictionary.

use std::collections::BTreeMap;
use std::ops::Bound;

use ahash::AHashMap;
use serde::Serialize;

use crate::analysis::token::Token;
use crate::document::DocId;
use crate::index::posting::{Posting, PostingList};

/// Inverted index of a single column.
///
/// Terms are kept sorted so prefix queries can walk a contiguous range.
/// `doc_lengths[d]` is the number of tokens document `d` has in this column.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    terms: BTreeMap<String, PostingList>,
    doc_lengths: Vec<u32>,
    total_tokens: u64,
}

/// Statistics of one column, as reported by `stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub unique_terms: usize,
    pub total_tokens: u64,
    pub average_length: f32,
    pub max_length: u32,
}

impl ColumnIndex {
    pub fn new() -> Self {
        ColumnIndex::default()
    }

    /// Index the analyzed tokens of the next document.
    ///
    /// `doc_id` must equal the number of documents added so far.
    pub fn add_document(&mut self, doc_id: DocId, tokens: Vec<Token>) {
        debug_assert_eq!(doc_id, self.doc_lengths.len() as DocId);

        let length = tokens.len() as u32;
        let mut occurrences: AHashMap<String, Vec<u32>> = AHashMap::new();
        for token in tokens {
            occurrences
                .entry(token.text)
                .or_default()
                .push(token.position as u32);
        }

        for (term, mut positions) in occurrences {
            positions.sort_unstable();
            self.terms
                .entry(term)
                .or_default()
                .push(Posting::new(doc_id, positions));
        }

        self.doc_lengths.push(length);
        self.total_tokens += u64::from(length);
    }

    /// Posting list of an exact term.
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// All terms starting with `prefix`, in lexicographic order.
    pub fn terms_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PostingList)> + 'a {
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(term, _)| term.starts_with(prefix))
            .map(|(term, list)| (term.as_str(), list))
    }

    /// Token count of a document in this column.
    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.doc_lengths
            .get(doc_id as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Number of documents indexed.
    pub fn doc_count(&self) -> u64 {
        self.doc_lengths.len() as u64
    }

    /// Average token count per document; 0 for an empty column.
    pub fn average_length(&self) -> f32 {
        if self.doc_lengths.is_empty() {
            0.0
        } else {
            self.total_tokens as f32 / self.doc_lengths.len() as f32
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn unique_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn stats(&self) -> ColumnStats {
        ColumnStats {
            unique_terms: self.unique_terms(),
            total_tokens: self.total_tokens,
            average_length: self.average_length(),
            max_length: self.doc_lengths.iter().copied().max().unwrap_or_default(),
        }
    }
}
