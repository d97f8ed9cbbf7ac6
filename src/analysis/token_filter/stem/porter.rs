//! Porter stemming algorithm implementation.
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes, terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and reduce -ll
//!
//! Only words made of ASCII letters are stemmed; anything else (digits,
//! non-Latin scripts) is returned unchanged.
//!
//! # Examples
//!
//! ```
//! use ftsmachine::analysis::token_filter::stem::Stemmer;
//! use ftsmachine::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Whether the letter at `pos` acts as a consonant (`y` after a consonant is a vowel).
    fn is_consonant(word: &[u8], pos: usize) -> bool {
        match word[pos] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => pos == 0 || !Self::is_consonant(word, pos - 1),
            _ => true,
        }
    }

    /// Calculate the measure of a word: `m` in `[C](VC)^m[V]`.
    fn measure(word: &[u8]) -> usize {
        let len = word.len();
        let mut i = 0;
        while i < len && Self::is_consonant(word, i) {
            i += 1;
        }

        let mut m = 0;
        loop {
            while i < len && !Self::is_consonant(word, i) {
                i += 1;
            }
            if i >= len {
                return m;
            }
            while i < len && Self::is_consonant(word, i) {
                i += 1;
            }
            m += 1;
        }
    }

    fn contains_vowel(word: &[u8]) -> bool {
        (0..word.len()).any(|i| !Self::is_consonant(word, i))
    }

    fn ends_with_double_consonant(word: &[u8]) -> bool {
        let len = word.len();
        len >= 2 && word[len - 1] == word[len - 2] && Self::is_consonant(word, len - 1)
    }

    /// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
    fn ends_cvc(word: &[u8]) -> bool {
        let len = word.len();
        len >= 3
            && Self::is_consonant(word, len - 3)
            && !Self::is_consonant(word, len - 2)
            && Self::is_consonant(word, len - 1)
            && !matches!(word[len - 1], b'w' | b'x' | b'y')
    }

    /// Apply the first rule whose suffix matches, if the remaining stem has m > 0.
    fn replace_suffix(word: &mut Vec<u8>, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if word.ends_with(suffix.as_bytes()) {
                let stem_len = word.len() - suffix.len();
                if Self::measure(&word[..stem_len]) > 0 {
                    word.truncate(stem_len);
                    word.extend_from_slice(replacement.as_bytes());
                }
                return;
            }
        }
    }

    fn step1a(word: &mut Vec<u8>) {
        if word.ends_with(b"sses") || word.ends_with(b"ies") {
            word.truncate(word.len() - 2);
        } else if word.ends_with(b"s") && !word.ends_with(b"ss") {
            word.pop();
        }
    }

    fn step1b(word: &mut Vec<u8>) {
        if word.ends_with(b"eed") {
            if Self::measure(&word[..word.len() - 3]) > 0 {
                word.pop();
            }
            return;
        }

        let cut = if word.ends_with(b"ed") {
            2
        } else if word.ends_with(b"ing") {
            3
        } else {
            return;
        };
        let stem_len = word.len() - cut;
        if !Self::contains_vowel(&word[..stem_len]) {
            return;
        }
        word.truncate(stem_len);

        if word.ends_with(b"at") || word.ends_with(b"bl") || word.ends_with(b"iz") {
            word.push(b'e');
        } else if Self::ends_with_double_consonant(word)
            && !matches!(word.last(), Some(b'l' | b's' | b'z'))
        {
            word.pop();
        } else if Self::measure(word) == 1 && Self::ends_cvc(word) {
            word.push(b'e');
        }
    }

    fn step1c(word: &mut Vec<u8>) {
        let len = word.len();
        if word.ends_with(b"y") && Self::contains_vowel(&word[..len - 1]) {
            word[len - 1] = b'i';
        }
    }

    fn step4(word: &mut Vec<u8>) {
        for suffix in STEP4_SUFFIXES {
            if word.ends_with(suffix.as_bytes()) {
                let stem_len = word.len() - suffix.len();
                let stem = &word[..stem_len];
                // -ion is only removed after s or t
                let allowed = *suffix != "ion" || matches!(stem.last(), Some(b's' | b't'));
                if allowed && Self::measure(stem) > 1 {
                    word.truncate(stem_len);
                }
                return;
            }
        }
    }

    fn step5(word: &mut Vec<u8>) {
        if word.ends_with(b"e") {
            let stem = &word[..word.len() - 1];
            let m = Self::measure(stem);
            if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                word.pop();
            }
        }

        if word.ends_with(b"ll") && Self::measure(word) > 1 {
            word.pop();
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            return word.to_string();
        }

        let mut bytes = word.to_ascii_lowercase().into_bytes();
        Self::step1a(&mut bytes);
        Self::step1b(&mut bytes);
        Self::step1c(&mut bytes);
        Self::replace_suffix(&mut bytes, STEP2_RULES);
        Self::replace_suffix(&mut bytes, STEP3_RULES);
        Self::step4(&mut bytes);
        Self::step5(&mut bytes);

        // Only ASCII letters were ever written into the buffer.
        String::from_utf8(bytes).unwrap_or_else(|_| word.to_string())
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}
