//! Shared "current text" slot and the loader that feeds it to playback.
//!
//! Writers (text submission, history selection) publish into a [`TextSlot`];
//! the runtime either awaits [`TextSlot::wait_changed`] or polls every
//! [`SESSION_POLL_INTERVAL_MS`], and [`SessionLoader::poll`] re-tokenizes
//! whenever the slot holds text different from what is loaded.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_sync::signal::Signal;
use log::info;

use crate::{
    content::{first_words_excerpt, tokenize},
    playback::PlaybackEngine,
};

/// Fallback polling period for slot changes.
pub const SESSION_POLL_INTERVAL_MS: u64 = 100;
/// Upper bound between a slot write and the loader observing it.
pub const SESSION_MAX_LATENCY_MS: u64 = 250;

pub const MIN_SUBMISSION_CHARS: usize = 10;
pub const MAX_SUBMISSION_CHARS: usize = 5_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionError {
    TooShort { chars: usize, min: usize },
    TooLong { chars: usize, max: usize },
}

/// Length check applied before text ever reaches the slot.
pub fn validate_submission(text: &str) -> Result<(), SubmissionError> {
    let chars = text.chars().count();
    if chars < MIN_SUBMISSION_CHARS {
        return Err(SubmissionError::TooShort {
            chars,
            min: MIN_SUBMISSION_CHARS,
        });
    }
    if chars > MAX_SUBMISSION_CHARS {
        return Err(SubmissionError::TooLong {
            chars,
            max: MAX_SUBMISSION_CHARS,
        });
    }
    Ok(())
}

/// Validate and publish user-submitted text. Returns whether the slot changed.
pub fn submit_text(slot: &TextSlot, text: &str) -> Result<bool, SubmissionError> {
    validate_submission(text)?;
    Ok(slot.set(text))
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SlotSnapshot {
    pub revision: u32,
    pub text: Option<String>,
}

#[derive(Debug)]
struct SlotState {
    text: Option<String>,
    revision: u32,
}

/// Session-scoped text value with change notification.
///
/// The revision only moves when the stored text actually changes.
pub struct TextSlot {
    state: Mutex<CriticalSectionRawMutex, RefCell<SlotState>>,
    changed: Signal<CriticalSectionRawMutex, u32>,
}

impl Default for TextSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSlot {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(SlotState {
                text: None,
                revision: 0,
            })),
            changed: Signal::new(),
        }
    }

    /// Store `text`. Returns `false` when it equals the current value.
    pub fn set(&self, text: &str) -> bool {
        let revision = self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            if state.text.as_deref() == Some(text) {
                return None;
            }
            state.text = Some(text.to_string());
            state.revision = state.revision.wrapping_add(1);
            Some(state.revision)
        });

        match revision {
            Some(revision) => {
                self.changed.signal(revision);
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) -> bool {
        let revision = self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            state.text.take()?;
            state.revision = state.revision.wrapping_add(1);
            Some(state.revision)
        });

        match revision {
            Some(revision) => {
                self.changed.signal(revision);
                true
            }
            None => false,
        }
    }

    pub fn text(&self) -> Option<String> {
        self.state.lock(|cell| cell.borrow().text.clone())
    }

    pub fn revision(&self) -> u32 {
        self.state.lock(|cell| cell.borrow().revision)
    }

    pub fn snapshot(&self) -> SlotSnapshot {
        self.state.lock(|cell| {
            let state = cell.borrow();
            SlotSnapshot {
                revision: state.revision,
                text: state.text.clone(),
            }
        })
    }

    /// Resolve with the latest revision once the slot has changed.
    pub async fn wait_changed(&self) -> u32 {
        self.changed.wait().await
    }
}

/// Tracks which slot value is loaded into the engine.
#[derive(Debug, Default)]
pub struct SessionLoader {
    seen_revision: Option<u32>,
    loaded_text: Option<String>,
}

impl SessionLoader {
    pub const fn new() -> Self {
        Self {
            seen_revision: None,
            loaded_text: None,
        }
    }

    /// Load the slot's text into `engine` if it changed since the last poll.
    /// Returns the new word count when a load happened.
    pub fn poll(&mut self, slot: &TextSlot, engine: &mut PlaybackEngine) -> Option<usize> {
        let revision = slot.revision();
        if self.seen_revision == Some(revision) {
            return None;
        }

        let snapshot = slot.snapshot();
        self.seen_revision = Some(snapshot.revision);
        let text = snapshot.text?;
        if self.loaded_text.as_deref() == Some(text.as_str()) {
            return None;
        }

        let words = tokenize(&text);
        let count = words.len();
        engine.load(words);
        info!(
            "session: loaded revision={} words={} start={:?}",
            snapshot.revision,
            count,
            first_words_excerpt(&text, 5)
        );
        self.loaded_text = Some(text);
        Some(count)
    }

    pub fn loaded_text(&self) -> Option<&str> {
        self.loaded_text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackPhase;

    const TEXT: &str = "alpha beta gamma delta";

    #[test]
    fn loads_text_present_at_mount() {
        let slot = TextSlot::new();
        assert!(slot.set(TEXT));

        let mut engine = PlaybackEngine::default();
        let mut loader = SessionLoader::new();
        assert_eq!(loader.poll(&slot, &mut engine), Some(4));
        assert_eq!(engine.current_word(), Some("alpha"));
        assert_eq!(loader.loaded_text(), Some(TEXT));
    }

    #[test]
    fn empty_slot_loads_nothing() {
        let slot = TextSlot::new();
        let mut engine = PlaybackEngine::default();
        let mut loader = SessionLoader::new();

        assert_eq!(loader.poll(&slot, &mut engine), None);
        assert_eq!(engine.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn identical_value_does_not_retrigger() {
        let slot = TextSlot::new();
        let mut engine = PlaybackEngine::default();
        let mut loader = SessionLoader::new();

        slot.set(TEXT);
        loader.poll(&slot, &mut engine);
        engine.seek(2);
        engine.play(0);

        assert!(!slot.set(TEXT));
        assert_eq!(loader.poll(&slot, &mut engine), None);
        assert_eq!(engine.index(), 2);
        assert!(engine.is_playing());
    }

    #[test]
    fn new_text_resets_playback() {
        let slot = TextSlot::new();
        let mut engine = PlaybackEngine::default();
        let mut loader = SessionLoader::new();

        slot.set(TEXT);
        loader.poll(&slot, &mut engine);
        engine.seek(3);
        engine.step(-1);
        engine.play(0);

        slot.set("one two");
        assert_eq!(loader.poll(&slot, &mut engine), Some(2));
        assert_eq!(engine.index(), 0);
        assert!(!engine.is_playing());
    }

    #[test]
    fn switching_back_to_previous_text_reloads() {
        let slot = TextSlot::new();
        let mut engine = PlaybackEngine::default();
        let mut loader = SessionLoader::new();

        slot.set("first text here");
        loader.poll(&slot, &mut engine);
        slot.set("second text");
        slot.set("first text here");
        // Intermediate value never observed; the final one equals the loaded text.
        assert_eq!(loader.poll(&slot, &mut engine), None);

        slot.set("second text");
        assert_eq!(loader.poll(&slot, &mut engine), Some(2));
    }

    #[test]
    fn revision_moves_only_on_change() {
        let slot = TextSlot::new();
        assert_eq!(slot.revision(), 0);
        assert!(slot.set("a"));
        assert!(!slot.set("a"));
        assert_eq!(slot.revision(), 1);
        assert!(slot.clear());
        assert!(!slot.clear());
        assert_eq!(
            slot.snapshot(),
            SlotSnapshot {
                revision: 2,
                text: None
            }
        );
    }

    #[test]
    fn wait_changed_resolves_after_publish() {
        let slot = TextSlot::new();
        slot.set("published");
        assert_eq!(embassy_futures::block_on(slot.wait_changed()), 1);
    }

    #[test]
    fn submission_length_is_validated() {
        let slot = TextSlot::new();
        assert_eq!(
            submit_text(&slot, "too short"),
            Err(SubmissionError::TooShort { chars: 9, min: 10 })
        );
        assert_eq!(slot.text(), None);

        let long = "x".repeat(MAX_SUBMISSION_CHARS + 1);
        assert_eq!(
            validate_submission(&long),
            Err(SubmissionError::TooLong {
                chars: 5_001,
                max: 5_000
            })
        );

        assert_eq!(submit_text(&slot, "long enough text"), Ok(true));
        assert_eq!(submit_text(&slot, "long enough text"), Ok(false));
        assert_eq!(validate_submission(&"ü".repeat(10)), Ok(()));
    }
}
