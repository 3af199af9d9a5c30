//! Cancellable deadline timer behind the playback tick.

use core::time::Duration;

const MS_PER_MINUTE: u64 = 60_000;

/// Exact per-word display time at `wpm` (`60 s / wpm`, nanosecond precision).
pub fn word_interval(wpm: u16) -> Duration {
    Duration::from_secs(60) / u32::from(wpm.max(1))
}

/// Per-word display time truncated to whole milliseconds.
pub const fn word_interval_ms(wpm: u16) -> u64 {
    let wpm = if wpm == 0 { 1 } else { wpm as u64 };
    MS_PER_MINUTE / wpm
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Schedule {
    anchor_ms: u64,
    wpm: u16,
    fired: u64,
}

impl Schedule {
    // Tick k lands at anchor + floor(k * 60000 / wpm).
    fn deadline(&self, tick: u64) -> u64 {
        let offset = tick.saturating_mul(MS_PER_MINUTE) / u64::from(self.wpm.max(1));
        self.anchor_ms.saturating_add(offset)
    }
}

/// Single-slot repeating timer; arming replaces any previous schedule.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TickTimer {
    schedule: Option<Schedule>,
    generation: u32,
}

impl TickTimer {
    pub const fn new() -> Self {
        Self {
            schedule: None,
            generation: 0,
        }
    }

    /// Start (or restart) the repeating timer at `wpm`, first tick one
    /// interval after `now_ms`. Any previous schedule is dropped.
    pub fn arm(&mut self, now_ms: u64, wpm: u16) {
        self.schedule = Some(Schedule {
            anchor_ms: now_ms,
            wpm: wpm.max(1),
            fired: 0,
        });
        self.generation = self.generation.wrapping_add(1);
    }

    /// Cancel the pending tick. Returns whether a schedule was active.
    pub fn cancel(&mut self) -> bool {
        self.schedule.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.schedule.is_some()
    }

    /// Number of times the timer has been armed; diagnostics only.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.schedule
            .map(|schedule| schedule.deadline(schedule.fired + 1))
    }

    /// Consume one due tick. Returns `true` at most once per call.
    ///
    /// When the caller polls so late that the following deadline has also
    /// passed, the schedule re-anchors at `now_ms` instead of bursting
    /// through the missed ticks.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };

        if now_ms < schedule.deadline(schedule.fired + 1) {
            return false;
        }

        schedule.fired += 1;
        if schedule.deadline(schedule.fired + 1) <= now_ms {
            *schedule = Schedule {
                anchor_ms: now_ms,
                wpm: schedule.wpm,
                fired: 0,
            };
        }

        true
    }
}
