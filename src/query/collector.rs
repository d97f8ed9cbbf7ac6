//! Top-N hit collection.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::document::DocId;

/// A scored document for use in the heap.
#[derive(Debug, Clone, Copy)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f32,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Worse hits compare greater: lower score, then higher doc ID.
impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Keeps the best `max_docs` hits by descending score, ties by ascending
/// document ID.
#[derive(Debug)]
pub struct TopDocsCollector {
    max_docs: usize,
    /// Max-heap of the kept hits; the worst one sits on top.
    hits: BinaryHeap<ScoredDoc>,
    total_hits: u64,
}

impl TopDocsCollector {
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            max_docs,
            hits: BinaryHeap::with_capacity(max_docs.min(1024) + 1),
            total_hits: 0,
        }
    }

    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Offer a hit.
    pub fn collect(&mut self, doc_id: DocId, score: f32) {
        self.total_hits += 1;
        if self.max_docs == 0 {
            return;
        }

        let doc = ScoredDoc { doc_id, score };
        if self.hits.len() < self.max_docs {
            self.hits.push(doc);
        } else if let Some(mut worst) = self.hits.peek_mut()
            && doc < *worst
        {
            *worst = doc;
        }
    }

    /// Number of hits offered, including the ones that were dropped.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Kept hits, best first.
    pub fn into_sorted_vec(self) -> Vec<ScoredDoc> {
        self.hits.into_sorted_vec()
    }
}
