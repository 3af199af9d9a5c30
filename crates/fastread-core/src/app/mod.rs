//! Reader state machine: text submission, RSVP playback and saved sessions.

use log::{debug, info, warn};

use crate::{
    clock::Clock,
    history::{HistoryEntry, HistoryError, HistoryList, HistoryStore},
    input::{InputEvent, InputProvider},
    playback::{
        DEFAULT_SKIP_WORDS, DEFAULT_WPM, MAX_WPM, MIN_WPM, PlaybackEngine, RateLimits,
        TickOutcome,
    },
    render::{FullTextView, Screen},
    session::{SESSION_POLL_INTERVAL_MS, SessionLoader, TextSlot, submit_text},
    storage::KeyValueStore,
    text_policy::session_title,
};

pub const APP_TITLE: &str = "FASTREAD";
/// Source recorded on entries saved from the reader.
pub const SAVED_SOURCE_URL: &str = "/read";
pub const SAVED_NOTICE_MS: u64 = 2_000;

const WPM_STEP: u16 = 25;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub wpm_step: u16,
    pub skip_words: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            min_wpm: MIN_WPM,
            max_wpm: MAX_WPM,
            wpm_step: WPM_STEP,
            skip_words: DEFAULT_SKIP_WORDS,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum UiState {
    Reader,
    Status {
        line1: &'static str,
        line2: &'static str,
    },
}

pub struct ReaderApp<'a, S, IN, C>
where
    S: KeyValueStore,
    IN: InputProvider,
    C: Clock,
{
    slot: &'a TextSlot,
    history: HistoryStore<S>,
    input: IN,
    clock: C,
    config: ReaderConfig,
    engine: PlaybackEngine,
    loader: SessionLoader,
    ui: UiState,
    history_snapshot: HistoryList,
    show_full_text: bool,
    saved_until_ms: Option<u64>,
    pending_redraw: bool,
    quit_requested: bool,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");

#[cfg(test)]
mod tests;
