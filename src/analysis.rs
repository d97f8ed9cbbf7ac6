//! Text analysis for ftsmachine.
//!
//! Text flows through a tokenizer (segmentation) and a chain of token filters
//! (case folding, stemming). [`analyzer::PipelineAnalyzer`] ties the two
//! together and is built from a table's [`crate::schema::TokenizerConfig`].

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
