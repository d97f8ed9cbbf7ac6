//! Query compilation and matching against column indexes.
//!
//! A query is compiled into units, each of which must match somewhere in the
//! searched columns. Every unit is scored as one BM25 term.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::analysis::analyzer::Analyzer;
use crate::document::DocId;
use crate::error::{FtsError, Result};
use crate::index::column::ColumnIndex;
use crate::index::posting::{Posting, PostingList};
use crate::query::scorer::Bm25;
use crate::query::{MatchType, SearchQuery};

/// One matchable part of a compiled query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryUnit {
    /// An analyzed term.
    Term(String),
    /// Any indexed term starting with this text.
    Prefix(String),
    /// Analyzed terms at consecutive positions.
    Phrase(Vec<String>),
}

impl QueryUnit {
    /// Documents of `index` matched by this unit with their frequencies,
    /// ascending by document ID.
    fn matches(&self, index: &ColumnIndex) -> Vec<(DocId, u32)> {
        match self {
            QueryUnit::Term(term) => index
                .postings(term)
                .map(|list| list.iter().map(|p| (p.doc_id, p.frequency())).collect())
                .unwrap_or_default(),
            QueryUnit::Prefix(prefix) => {
                let mut frequencies: BTreeMap<DocId, u32> = BTreeMap::new();
                for (_, list) in index.terms_with_prefix(prefix) {
                    for posting in list {
                        *frequencies.entry(posting.doc_id).or_default() += posting.frequency();
                    }
                }
                frequencies.into_iter().collect()
            }
            QueryUnit::Phrase(terms) => phrase_matches(terms, index),
        }
    }
}

fn phrase_matches(terms: &[String], index: &ColumnIndex) -> Vec<(DocId, u32)> {
    let Some(lists) = terms
        .iter()
        .map(|term| index.postings(term))
        .collect::<Option<Vec<&PostingList>>>()
    else {
        return Vec::new();
    };
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };

    first
        .iter()
        .filter_map(|posting| {
            let following = rest
                .iter()
                .map(|list| list.get(posting.doc_id))
                .collect::<Option<Vec<&Posting>>>()?;
            let occurrences = posting
                .positions
                .iter()
                .filter(|&&start| {
                    following
                        .iter()
                        .zip(1u32..)
                        .all(|(next, offset)| next.has_position(start + offset))
                })
                .count() as u32;
            (occurrences > 0).then_some((posting.doc_id, occurrences))
        })
        .collect()
}

/// A query reduced to index terms.
#[derive(Debug, Clone)]
pub(crate) struct Matcher {
    units: Vec<QueryUnit>,
    bm25: Bm25,
}

impl Matcher {
    /// Analyze the query term. `prefix_analyzer` must not stem.
    pub(crate) fn compile(
        query: &SearchQuery,
        analyzer: &dyn Analyzer,
        prefix_analyzer: &dyn Analyzer,
    ) -> Result<Self> {
        let analyze = |analyzer: &dyn Analyzer, text: &str| {
            analyzer
                .terms(text)
                .map_err(|e| FtsError::query(format!("cannot analyze '{text}': {e}")))
        };

        let term = query.term().trim();
        let units = match query.match_type() {
            MatchType::TokenMatch => {
                let mut terms = analyze(analyzer, term)?;
                let mut seen = Vec::with_capacity(terms.len());
                terms.retain(|t| {
                    if seen.contains(t) {
                        false
                    } else {
                        seen.push(t.clone());
                        true
                    }
                });
                terms.into_iter().map(QueryUnit::Term).collect()
            }
            MatchType::PrefixMatch => {
                let stripped = term.trim_end_matches('*');
                let mut terms = analyze(prefix_analyzer, stripped)?;
                if terms.len() > 1 {
                    return Err(FtsError::query(format!(
                        "prefix '{stripped}' must be a single token"
                    )));
                }
                terms.pop().map(QueryUnit::Prefix).into_iter().collect()
            }
            MatchType::ExactPhrase => {
                let mut terms = analyze(analyzer, term)?;
                if terms.len() == 1 {
                    terms.pop().map(QueryUnit::Term).into_iter().collect()
                } else if terms.is_empty() {
                    Vec::new()
                } else {
                    vec![QueryUnit::Phrase(terms)]
                }
            }
        };

        if units.is_empty() {
            return Err(FtsError::query(format!(
                "'{term}' contains no searchable tokens"
            )));
        }

        Ok(Matcher {
            units,
            bm25: Bm25::default(),
        })
    }

    #[cfg(test)]
    pub(crate) fn units(&self) -> &[QueryUnit] {
        &self.units
    }

    /// Score every document matched by all units in at least one of
    /// `columns`. Per-column scores of a unit are summed.
    pub(crate) fn score(&self, columns: &[&ColumnIndex]) -> AHashMap<DocId, f32> {
        let mut combined: Option<AHashMap<DocId, f32>> = None;

        for unit in &self.units {
            let mut unit_scores: AHashMap<DocId, f32> = AHashMap::new();
            for index in columns {
                let matches = unit.matches(index);
                if matches.is_empty() {
                    continue;
                }
                let idf = self.bm25.idf(matches.len() as u64, index.doc_count());
                let avg_length = index.average_length();
                for (doc_id, frequency) in matches {
                    let weight = self.bm25.term_weight(
                        idf,
                        frequency,
                        index.doc_length(doc_id),
                        avg_length,
                    );
                    *unit_scores.entry(doc_id).or_default() += weight;
                }
            }

            let scores = match combined.take() {
                None => unit_scores,
                Some(mut scores) => {
                    scores.retain(|doc_id, score| match unit_scores.get(doc_id) {
                        Some(weight) => {
                            *score += weight;
                            true
                        }
                        None => false,
                    });
                    scores
                }
            };
            if scores.is_empty() {
                return scores;
            }
            combined = Some(scores);
        }

        combined.unwrap_or_default()
    }
}
