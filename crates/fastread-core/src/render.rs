//! App-level view models consumed by the host renderer.

use crate::history::HistoryEntry;

/// Full text with the current word highlighted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FullTextView<'a> {
    pub words: &'a [Box<str>],
    pub highlighted: usize,
}

impl<'a> FullTextView<'a> {
    /// Words paired with whether each is the highlighted one.
    pub fn marked_words(self) -> impl Iterator<Item = (&'a str, bool)> {
        self.words
            .iter()
            .enumerate()
            .map(move |(index, word)| (&**word, index == self.highlighted))
    }
}

/// Snapshot handed to the renderer for one frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen<'a> {
    /// No text loaded, or the text had no words.
    Empty {
        title: &'a str,
        wpm: u16,
        history: &'a [HistoryEntry],
    },
    Reading {
        title: &'a str,
        wpm: u16,
        word: &'a str,
        word_index: usize,
        word_total: usize,
        playing: bool,
        /// Brief confirmation after a successful save.
        saved: bool,
        full_text: Option<FullTextView<'a>>,
        history: &'a [HistoryEntry],
    },
    Status {
        title: &'a str,
        wpm: u16,
        line1: &'a str,
        line2: &'a str,
    },
}
