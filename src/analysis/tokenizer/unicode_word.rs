//! Unicode word tokenizer implementation.
//!
//! Splits text using Unicode word boundary rules (UAX #29), then breaks each
//! segment into runs of alphanumerics and combining marks. Whitespace and
//! punctuation never reach a token, including the apostrophes, underscores
//! and periods that UAX #29 keeps inside a word, so "can't" yields "can" and
//! "t".
//!
//! ```
//! use ftsmachine::analysis::tokenizer::Tokenizer;
//! use ftsmachine::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world! can't café").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "can");
//! assert_eq!(tokens[3].text, "t");
//! assert_eq!(tokens[4].text, "café");
//! ```

use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }

    fn is_token_char(c: char) -> bool {
        c.is_alphanumeric() || is_combining_mark(c)
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();

        for (segment_start, segment) in text.split_word_bound_indices() {
            let mut start: Option<usize> = None;
            for (offset, c) in segment.char_indices() {
                match (Self::is_token_char(c), start) {
                    (true, None) => start = Some(offset),
                    (false, Some(begin)) => {
                        tokens.push(Token::with_offsets(
                            &segment[begin..offset],
                            tokens.len(),
                            segment_start + begin,
                            segment_start + offset,
                        ));
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(begin) = start {
                tokens.push(Token::with_offsets(
                    &segment[begin..],
                    tokens.len(),
                    segment_start + begin,
                    segment_start + segment.len(),
                ));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
