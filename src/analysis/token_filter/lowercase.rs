//! Lowercase filter implementation.
//!
//! Case folding makes matching case-insensitive. The Unicode variant is used
//! with Unicode word segmentation; the ASCII variant folds only `A-Z` and is
//! paired with byte segmentation, leaving multi-byte text untouched.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter {
    ascii_only: bool,
}

impl LowercaseFilter {
    /// Create a new Unicode-aware lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter { ascii_only: false }
    }

    /// Create a filter that only folds ASCII letters.
    pub fn ascii() -> Self {
        LowercaseFilter { ascii_only: true }
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let ascii_only = self.ascii_only;
        let filtered_tokens = tokens
            .map(|token| {
                let folded = if ascii_only {
                    token.text.to_ascii_lowercase()
                } else {
                    token.text.to_lowercase()
                };
                token.with_text(folded)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        if self.ascii_only {
            "ascii_lowercase"
        } else {
            "lowercase"
        }
    }
}
