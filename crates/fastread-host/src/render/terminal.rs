//! Plain-text frame renderer for [`Screen`] view models.

use std::io::{self, Write};

use fastread_core::{
    history::HistoryEntry,
    render::{FullTextView, Screen},
    text_policy::{preview_compact, progress_label, time_ago},
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
pub const FULL_TEXT_WIDTH: usize = 72;
const WORD_COLUMN: usize = 24;

pub struct TerminalRenderer<W: Write> {
    out: W,
    clear_between_frames: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clear_between_frames: true,
        }
    }

    /// Append frames instead of redrawing in place; used for non-tty output.
    pub fn without_clearing(mut self) -> Self {
        self.clear_between_frames = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn draw(&mut self, screen: Screen<'_>, now_unix_ms: u64) -> io::Result<()> {
        if self.clear_between_frames {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }

        match screen {
            Screen::Empty {
                title,
                wpm,
                history,
            } => {
                self.header(title, wpm, "idle")?;
                writeln!(self.out)?;
                writeln!(self.out, "No text to read.")?;
                writeln!(self.out)?;
                self.history(history, now_unix_ms)?;
            }
            Screen::Reading {
                title,
                wpm,
                word,
                word_index,
                word_total,
                playing,
                saved,
                full_text,
                history,
            } => {
                self.header(title, wpm, if playing { "playing" } else { "paused" })?;
                writeln!(self.out)?;
                writeln!(self.out, "{}", centered(word))?;
                writeln!(self.out)?;
                write!(self.out, "{}", progress_label(word_index, word_total))?;
                if saved {
                    write!(self.out, "  [saved]")?;
                }
                writeln!(self.out)?;
                if let Some(view) = full_text {
                    writeln!(self.out)?;
                    self.full_text(view)?;
                }
                writeln!(self.out)?;
                self.history(history, now_unix_ms)?;
            }
            Screen::Status {
                title,
                wpm,
                line1,
                line2,
            } => {
                self.header(title, wpm, "status")?;
                writeln!(self.out)?;
                writeln!(self.out, "{line1}")?;
                writeln!(self.out, "{line2}")?;
            }
        }

        self.out.flush()
    }

    fn header(&mut self, title: &str, wpm: u16, state: &str) -> io::Result<()> {
        writeln!(self.out, "{title} | {wpm} wpm | {state}")
    }

    fn full_text(&mut self, view: FullTextView<'_>) -> io::Result<()> {
        let mut column = 0usize;
        for (word, highlighted) in view.marked_words() {
            let width = word.chars().count() + if highlighted { 2 } else { 0 };
            if column > 0 && column + 1 + width > FULL_TEXT_WIDTH {
                writeln!(self.out)?;
                column = 0;
            }
            if column > 0 {
                write!(self.out, " ")?;
                column += 1;
            }
            if highlighted {
                write!(self.out, "[{word}]")?;
            } else {
                write!(self.out, "{word}")?;
            }
            column += width;
        }
        writeln!(self.out)
    }

    fn history(&mut self, history: &[HistoryEntry], now_unix_ms: u64) -> io::Result<()> {
        if history.is_empty() {
            return writeln!(self.out, "History: empty");
        }

        writeln!(self.out, "History:")?;
        for entry in history {
            write!(
                self.out,
                "  {}  {} ({})",
                entry.id,
                entry.title,
                time_ago(entry.created_at_ms, now_unix_ms)
            )?;
            if let Some(text) = entry.text.as_deref() {
                write!(self.out, "  {}", preview_compact(text))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

fn centered(word: &str) -> String {
    let pad = WORD_COLUMN.saturating_sub(word.chars().count() / 2);
    format!("{}{}", " ".repeat(pad), word)
}
