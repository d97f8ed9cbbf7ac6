//! Diacritic folding filter.
//!
//! Tokens are decomposed (NFD), combining marks are dropped and the rest is
//! recomposed (NFC), so `résumé` and `resume` index to the same term. This is
//! the default behaviour of the `unicode61` tokenizer of SQL full-text
//! engines.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes diacritics from tokens.
#[derive(Clone, Debug, Default)]
pub struct DiacriticFilter;

impl DiacriticFilter {
    pub fn new() -> Self {
        DiacriticFilter
    }

    /// Fold one word. ASCII words are returned as they are.
    pub fn fold(text: &str) -> String {
        if text.is_ascii() {
            return text.to_string();
        }
        text.nfd()
            .filter(|c| !is_combining_mark(*c))
            .nfc()
            .collect()
    }
}

impl Filter for DiacriticFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                let folded = Self::fold(&token.text);
                token.with_text(folded)
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "remove_diacritics"
    }
}
