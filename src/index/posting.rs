//! Posting lists.
//!
//! A posting records that a term occurs in a document together with the
//! positions of every occurrence. Positions drive phrase matching; their
//! count is the term frequency used for scoring.

use crate::document::DocId;

/// A single posting in a posting list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Document ID.
    pub doc_id: DocId,
    /// Positions of the term in the column, ascending.
    pub positions: Vec<u32>,
}

impl Posting {
    /// Create a posting; `positions` must be ascending and non-empty.
    pub fn new(doc_id: DocId, positions: Vec<u32>) -> Self {
        debug_assert!(!positions.is_empty());
        Posting { doc_id, positions }
    }

    /// Get the term frequency.
    pub fn frequency(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Whether the term occurs at `position`.
    pub fn has_position(&self, position: u32) -> bool {
        self.positions.binary_search(&position).is_ok()
    }
}

/// A posting list for one term of one column, ordered by document ID.
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    postings: Vec<Posting>,
    total_frequency: u64,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        PostingList::default()
    }

    /// Append a posting. Documents are loaded in ID order, so appending keeps
    /// the list sorted.
    pub fn push(&mut self, posting: Posting) {
        debug_assert!(
            self.postings
                .last()
                .is_none_or(|last| last.doc_id < posting.doc_id)
        );
        self.total_frequency += u64::from(posting.frequency());
        self.postings.push(posting);
    }

    /// Find the posting of a document.
    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .ok()
            .map(|i| &self.postings[i])
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self) -> u64 {
        self.postings.len() as u64
    }

    /// Total occurrences across all documents.
    pub fn total_frequency(&self) -> u64 {
        self.total_frequency
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}
