//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by a tokenizer and return a new
//! stream:
//!
//! - [`lowercase::LowercaseFilter`] - Folds case (Unicode or ASCII-only)
//! - [`diacritic::DiacriticFilter`] - Removes diacritics
//! - [`stem::StemFilter`] - Reduces words to their stem form
//!
//! ```
//! use ftsmachine::analysis::token::Token;
//! use ftsmachine::analysis::token_filter::Filter;
//! use ftsmachine::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters must not renumber positions; the index stores positions as the
/// tokenizer assigned them.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod diacritic;
pub mod lowercase;
pub mod stem;
