//! Stop-word tokenizer
//!
//! Default [`Tokenizer`]: lower-case, split on whitespace, strip
//! non-alphanumeric characters from both ends of each word, drop stop words
//! and anything shorter than the minimum length.

use std::collections::{BTreeSet, HashSet};

use crate::ports::Tokenizer;

/// Stop words dropped by [`StopWordTokenizer::default`].
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
];

/// Words must be at least this many characters long.
pub const DEFAULT_MIN_LEN: usize = 3;

#[derive(Clone, Debug)]
pub struct StopWordTokenizer {
    stop_words: HashSet<String>,
    min_len: usize,
}

impl StopWordTokenizer {
    pub fn new<I, S>(stop_words: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            min_len,
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Default for StopWordTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied(), DEFAULT_MIN_LEN)
    }
}

impl Tokenizer for StopWordTokenizer {
    fn tokenize(&self, text: &str) -> BTreeSet<String> {
        text.split_whitespace()
            .map(|word| {
                word.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| word.chars().count() >= self.min_len && !self.is_stop_word(word))
            .collect()
    }
}
