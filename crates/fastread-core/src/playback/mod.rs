//! RSVP playback engine: index, rate and the repeating word timer.

mod timer;

pub use timer::{TickTimer, word_interval, word_interval_ms};

use log::debug;

use crate::content::WordSequence;

pub const DEFAULT_WPM: u16 = 300;
pub const MIN_WPM: u16 = 100;
pub const MAX_WPM: u16 = 800;
pub const DEFAULT_SKIP_WORDS: usize = 30;

/// Inclusive words-per-minute bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RateLimits {
    pub min_wpm: u16,
    pub max_wpm: u16,
}

impl RateLimits {
    pub const fn new(min_wpm: u16, max_wpm: u16) -> Self {
        let (min_wpm, max_wpm) = if min_wpm <= max_wpm {
            (min_wpm, max_wpm)
        } else {
            (max_wpm, min_wpm)
        };
        Self {
            min_wpm: if min_wpm == 0 { 1 } else { min_wpm },
            max_wpm: if max_wpm == 0 { 1 } else { max_wpm },
        }
    }

    pub fn clamp(self, wpm: u16) -> u16 {
        wpm.clamp(self.min_wpm, self.max_wpm)
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        Self::new(MIN_WPM, MAX_WPM)
    }
}

/// Snapshot of the engine's observable state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlaybackState {
    pub index: usize,
    pub is_playing: bool,
    pub rate_wpm: u16,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackPhase {
    /// Nothing to read.
    Idle,
    Paused,
    Playing,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    Idle,
    Paused,
    /// Playing, next word not due yet.
    Waiting,
    Advanced { index: usize },
    /// Reached the last word; playback stopped with the index left there.
    Finished { index: usize },
}

/// Owns the loaded words and the playback state machine.
///
/// `is_playing` is not stored separately: the engine is playing exactly when
/// its timer is armed.
#[derive(Clone, Debug)]
pub struct PlaybackEngine {
    words: WordSequence,
    index: usize,
    rate_wpm: u16,
    limits: RateLimits,
    timer: TickTimer,
    words_since_drain: u32,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WPM, RateLimits::default())
    }
}

impl PlaybackEngine {
    pub fn new(rate_wpm: u16, limits: RateLimits) -> Self {
        Self {
            words: WordSequence::empty(),
            index: 0,
            rate_wpm: limits.clamp(rate_wpm),
            limits,
            timer: TickTimer::new(),
            words_since_drain: 0,
        }
    }

    /// Replace the active sequence: stops playback and rewinds to the first word.
    pub fn load(&mut self, words: WordSequence) {
        if self.timer.cancel() {
            debug!("playback: load cancelled running timer");
        }
        self.words = words;
        self.index = 0;
        debug!("playback: loaded {} words", self.words.len());
    }

    /// Start the timing loop. Returns `true` only when playback actually
    /// started; empty text, a running loop or the final word make it a no-op.
    pub fn play(&mut self, now_ms: u64) -> bool {
        if self.words.is_empty() || self.timer.is_armed() {
            return false;
        }

        if self.index >= self.words.last_index() {
            debug!("playback: play ignored at final word {}", self.index);
            return false;
        }

        self.timer.arm(now_ms, self.rate_wpm);
        debug!(
            "playback: play index={} wpm={} interval_ms={}",
            self.index,
            self.rate_wpm,
            word_interval_ms(self.rate_wpm)
        );
        true
    }

    /// Stop the timing loop. Returns whether it was running.
    pub fn pause(&mut self) -> bool {
        let was_playing = self.timer.cancel();
        if was_playing {
            debug!("playback: pause index={}", self.index);
        }
        was_playing
    }

    /// Pause when playing, play otherwise. Returns the resulting play state.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now_ms);
        }
        self.is_playing()
    }

    /// Jump to `target`, clamped to the loaded words. Play state is untouched.
    pub fn seek(&mut self, target: isize) -> usize {
        let target = usize::try_from(target).unwrap_or(0);
        self.index = target.min(self.words.last_index());
        self.index
    }

    /// Relative seek, e.g. `step(30)` / `step(-30)` for the skip controls.
    pub fn step(&mut self, delta: isize) -> usize {
        let current = isize::try_from(self.index).unwrap_or(isize::MAX);
        self.seek(current.saturating_add(delta))
    }

    /// Change the rate, clamped to the limits. A running loop is cancelled
    /// and re-armed at the new interval; the index is not touched.
    pub fn set_rate(&mut self, wpm: u16, now_ms: u64) -> u16 {
        let next = self.limits.clamp(wpm);
        if next == self.rate_wpm {
            return next;
        }

        self.rate_wpm = next;
        if self.timer.cancel() {
            self.timer.arm(now_ms, next);
            debug!(
                "playback: rate {} wpm rescheduled at index={}",
                next, self.index
            );
        }
        next
    }

    /// Pause and rewind to the first word.
    pub fn reset(&mut self) {
        self.pause();
        self.seek(0);
    }

    /// Timer callback: consume at most one due tick.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if self.words.is_empty() {
            return TickOutcome::Idle;
        }
        if !self.timer.is_armed() {
            return TickOutcome::Paused;
        }
        if !self.timer.poll(now_ms) {
            return TickOutcome::Waiting;
        }

        if self.index >= self.words.last_index() {
            self.timer.cancel();
            debug!("playback: finished at index={}", self.index);
            return TickOutcome::Finished { index: self.index };
        }

        self.index += 1;
        self.words_since_drain = self.words_since_drain.saturating_add(1);
        TickOutcome::Advanced { index: self.index }
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            index: self.index,
            is_playing: self.is_playing(),
            rate_wpm: self.rate_wpm,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.words.is_empty() {
            PlaybackPhase::Idle
        } else if self.timer.is_armed() {
            PlaybackPhase::Playing
        } else {
            PlaybackPhase::Paused
        }
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rate_wpm(&self) -> u16 {
        self.rate_wpm
    }

    pub fn limits(&self) -> RateLimits {
        self.limits
    }

    pub fn words(&self) -> &WordSequence {
        &self.words
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.index)
    }

    /// Monotonic time of the next due tick while playing.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    pub fn timer_generation(&self) -> u32 {
        self.timer.generation()
    }

    /// Words advanced since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }
}
