//! BM25 relevance scoring.

use serde::{Deserialize, Serialize};

/// Okapi BM25 with the standard free parameters.
///
/// ```text
/// score(d) = Σ IDF(t) · TF(t,d) / (TF(t,d) + k1 · (1 − b + b · |d| / avgdl))
/// IDF(t)   = ln(1 + (N − n_t + 0.5) / (n_t + 0.5))
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25 {
    /// Term frequency saturation.
    pub k1: f32,
    /// Length normalization.
    pub b: f32,
}

impl Default for Bm25 {
    fn default() -> Self {
        Bm25 { k1: 1.2, b: 0.75 }
    }
}

impl Bm25 {
    pub fn new() -> Self {
        Bm25::default()
    }

    /// Inverse document frequency of a term found in `doc_freq` of
    /// `total_docs` documents. Always positive.
    pub fn idf(&self, doc_freq: u64, total_docs: u64) -> f32 {
        let n = total_docs as f32;
        let df = doc_freq as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Contribution of one query term to one document's score.
    pub fn term_weight(&self, idf: f32, term_freq: u32, doc_length: u32, avg_length: f32) -> f32 {
        if term_freq == 0 {
            return 0.0;
        }

        let tf = term_freq as f32;
        let length_ratio = if avg_length > 0.0 {
            doc_length as f32 / avg_length
        } else {
            1.0
        };
        let norm = 1.0 - self.b + self.b * length_ratio;

        idf * tf / (tf + self.k1 * norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf() {
        let bm25 = Bm25::new();
        // ln(1 + (3 - 1 + 0.5) / 1.5) = ln(8/3)
        assert!((bm25.idf(1, 3) - (8.0f32 / 3.0).ln()).abs() < 1e-6);
        assert!(bm25.idf(1, 3) > bm25.idf(2, 3));
        assert!(bm25.idf(3, 3) > 0.0);
    }

    #[test]
    fn test_term_weight() {
        let bm25 = Bm25::new();
        let idf = bm25.idf(1, 3);

        // Average-length document: norm = 1, weight = idf * 1 / (1 + 1.2).
        let weight = bm25.term_weight(idf, 1, 4, 4.0);
        assert!((weight - idf / 2.2).abs() < 1e-6);

        // Shorter documents score higher for the same frequency.
        assert!(bm25.term_weight(idf, 1, 2, 4.0) > weight);
        // Higher frequencies score higher, with saturation.
        let double = bm25.term_weight(idf, 2, 4, 4.0);
        assert!(double > weight && double < 2.0 * weight);

        assert_eq!(bm25.term_weight(idf, 0, 4, 4.0), 0.0);
    }
}
