//! Lexicon backends
//!
//! Deterministic stand-ins for the pretrained models. They need no files
//! on disk, so a fresh checkout can serve `/analyze` immediately.

pub mod emotion;
pub mod sentiment;
pub mod topics;

pub use emotion::LexiconEmotion;
pub use sentiment::LexiconSentiment;
pub use topics::LexiconTopicClassifier;

use adorescore_core::{Error, Result};
use aho_corasick::{AhoCorasick, MatchKind};

/// Keyword matcher that only accepts matches starting on a word boundary.
///
/// Keywords match word prefixes, so "deliver" also counts "delivered".
pub(crate) struct KeywordMatcher {
    automaton: AhoCorasick,
}

impl KeywordMatcher {
    pub(crate) fn new(context: &str, keywords: &[&str]) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(keywords)
            .map_err(|e| {
                Error::model(format!("Failed to build {context} keyword matcher: {e}"))
            })?;
        Ok(Self { automaton })
    }

    /// Count keyword hits in `text`
    pub(crate) fn hits(&self, text: &str) -> usize {
        let bytes = text.as_bytes();
        self.automaton
            .find_iter(text)
            .filter(|m| m.start() == 0 || !is_word_byte(bytes[m.start() - 1]))
            .count()
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
