//! Wall-clock abstraction used for history timestamps.

/// Source of wall-clock time in Unix milliseconds.
///
/// Playback scheduling never reads this; it runs on the monotonic `now_ms`
/// passed to every tick.
pub trait Clock {
    fn unix_ms(&self) -> u64;
}

/// Clock frozen at a fixed instant, advanced manually.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedClock {
    pub unix_ms: u64,
}

impl FixedClock {
    pub const fn new(unix_ms: u64) -> Self {
        Self { unix_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.unix_ms = self.unix_ms.saturating_add(ms);
    }
}

impl Clock for FixedClock {
    fn unix_ms(&self) -> u64 {
        self.unix_ms
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn unix_ms(&self) -> u64 {
        (**self).unix_ms()
    }
}
