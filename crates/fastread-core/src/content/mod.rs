//! Source text tokenization for RSVP playback.

mod text_utils;

pub use text_utils::first_words_excerpt;

use text_utils::next_word_at;

/// Ordered, immutable word tokens derived from one source text.
///
/// Tokens are never empty and never contain whitespace.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordSequence {
    words: Vec<Box<str>>,
}

impl WordSequence {
    pub const fn empty() -> Self {
        Self { words: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|word| &**word)
    }

    /// Highest valid index, `0` for an empty sequence.
    pub fn last_index(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    pub fn as_slice(&self) -> &[Box<str>] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| &**word)
    }
}

/// Split `text` on runs of whitespace, dropping empty tokens.
pub fn tokenize(text: &str) -> WordSequence {
    let mut words = Vec::new();
    let mut cursor = 0usize;

    while let Some((word, next_cursor)) = next_word_at(text, cursor) {
        words.push(Box::from(word));
        cursor = next_cursor;
    }

    WordSequence { words }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        let words = tokenize("alpha beta gamma");
        assert_eq!(words.iter().collect::<Vec<_>>(), ["alpha", "beta", "gamma"]);

        let words = tokenize("  one\t\ttwo\n\n three \r\n");
        assert_eq!(words.iter().collect::<Vec<_>>(), ["one", "two", "three"]);
    }

    #[test]
    fn blank_input_is_empty_not_an_error() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n\u{00A0}\u{2003} ").is_empty());
        assert_eq!(tokenize("   ").last_index(), 0);
    }

    #[test]
    fn tokens_never_empty_or_contain_whitespace() {
        let samples = [
            "En un lugar de la Mancha, de cuyo nombre no quiero acordarme,",
            "tabs\tand\u{3000}ideographic\u{2028}separators",
            "\n\n\n",
            "x",
            "trailing   ",
            "   leading",
            "mixed \u{00A0}nbsp\u{00A0} words",
        ];

        for sample in samples {
            for word in tokenize(sample).iter() {
                assert!(!word.is_empty(), "empty token from {sample:?}");
                assert!(
                    !word.chars().any(char::is_whitespace),
                    "whitespace inside {word:?}"
                );
            }
        }
    }

    #[test]
    fn single_word_is_idempotent() {
        let once = tokenize("hidalgo");
        let twice = tokenize(once.get(0).unwrap_or_default());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn multibyte_words_are_kept_whole() {
        let words = tokenize("Sigüenza  Amadís — Galaor");
        assert_eq!(
            words.iter().collect::<Vec<_>>(),
            ["Sigüenza", "Amadís", "—", "Galaor"]
        );
    }

    #[test]
    fn excerpt_limits_word_count() {
        assert_eq!(first_words_excerpt("a b c d", 2), "a b");
        assert_eq!(first_words_excerpt("  a   b  ", 5), "a   b");
        assert_eq!(first_words_excerpt("word", 0), "");
        assert_eq!(first_words_excerpt("", 3), "");
    }
}
