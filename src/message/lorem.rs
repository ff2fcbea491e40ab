//! Placeholder sentence generation for commit subjects.

use crate::error::ProviderError;
use rand::{Rng, seq::SliceRandom};

const WORDS: &[&str] = &[
    "ad", "adipiscing", "aliqua", "aliquip", "amet", "anim", "aute", "cillum", "commodo",
    "consectetur", "consequat", "culpa", "cupidatat", "deserunt", "do", "dolor", "dolore",
    "duis", "ea", "eiusmod", "elit", "enim", "esse", "est", "et", "eu", "ex", "excepteur",
    "exercitation", "fugiat", "id", "in", "incididunt", "ipsum", "irure", "labore",
    "laboris", "laborum", "lorem", "magna", "minim", "mollit", "nisi", "non", "nostrud",
    "nulla", "occaecat", "officia", "pariatur", "proident", "qui", "quis", "reprehenderit",
    "sint", "sit", "sunt", "tempor", "ullamco", "ut", "velit", "veniam", "voluptate",
];

/// Generates short lorem ipsum sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoremIpsum {
    min_words: usize,
    max_words: usize,
}

impl Default for LoremIpsum {
    fn default() -> Self {
        Self {
            min_words: 3,
            max_words: 6,
        }
    }
}

impl LoremIpsum {
    /// Create a generator producing between `min_words` and `max_words` words per sentence.
    pub fn new(min_words: usize, max_words: usize) -> Result<Self, ProviderError> {
        if min_words == 0 || min_words > max_words {
            return Err(ProviderError::Message {
                message: format!("invalid words per sentence range {min_words}..={max_words}"),
            });
        }
        Ok(Self {
            min_words,
            max_words,
        })
    }

    /// Generate one capitalized sentence terminated by a period.
    pub fn sentence<R: Rng>(&self, rng: &mut R) -> String {
        let count = rng.gen_range(self.min_words..=self.max_words);
        let words: Vec<&str> = (0..count)
            .filter_map(|_| WORDS.choose(&mut *rng).copied())
            .collect();

        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get(..1) {
            let upper = first.to_uppercase();
            sentence.replace_range(..1, &upper);
        }
        sentence.push('.');
        sentence
    }
}
