//! Byte-oriented tokenizer.
//!
//! Token characters are ASCII letters, ASCII digits and every non-ASCII
//! character; all other ASCII characters separate tokens. This mirrors the
//! classic `ascii` tokenizer of SQL full-text engines, where multi-byte
//! sequences are treated as opaque word bytes.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits on ASCII separator bytes.
#[derive(Clone, Debug, Default)]
pub struct ByteTokenizer;

impl ByteTokenizer {
    /// Create a new byte tokenizer.
    pub fn new() -> Self {
        ByteTokenizer
    }

    fn is_token_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || !c.is_ascii()
    }
}

impl Tokenizer for ByteTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (offset, c) in text.char_indices() {
            match (Self::is_token_char(c), start) {
                (true, None) => start = Some(offset),
                (false, Some(begin)) => {
                    tokens.push(Token::with_offsets(
                        &text[begin..offset],
                        tokens.len(),
                        begin,
                        offset,
                    ));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(begin) = start {
            tokens.push(Token::with_offsets(
                &text[begin..],
                tokens.len(),
                begin,
                text.len(),
            ));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "byte"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_ascii_separators() {
        let tokens: Vec<Token> = ByteTokenizer::new()
            .tokenize("foo-bar, baz_42!")
            .unwrap()
            .collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["foo", "bar", "baz", "42"]);
        assert_eq!(tokens[3].position, 3);
    }

    #[test]
    fn test_non_ascii_is_part_of_words() {
        // U+00A0 (no-break space) is non-ASCII and therefore a word character.
        let tokens: Vec<Token> = ByteTokenizer::new()
            .tokenize("café\u{a0}crème au lait")
            .unwrap()
            .collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "café\u{a0}crème");
        assert_eq!(tokens[2].end_offset, "café\u{a0}crème au lait".len());
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert_eq!(ByteTokenizer::new().tokenize("").unwrap().count(), 0);
        assert_eq!(ByteTokenizer::new().tokenize(" ,;- ").unwrap().count(), 0);
    }
}
