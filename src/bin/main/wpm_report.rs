use log::info;

use super::WPM_REPORT_INTERVAL_MS;

/// Accumulates advanced words and logs the measured rate periodically.
pub(super) struct WpmReport {
    words: u64,
    started_ms: u64,
}

impl WpmReport {
    pub(super) fn new(now_ms: u64) -> Self {
        Self {
            words: 0,
            started_ms: now_ms,
        }
    }

    /// Returns the rate in hundredths of a word per minute when a report
    /// window closed.
    pub(super) fn record(&mut self, words: u32, now_ms: u64) -> Option<u64> {
        self.words = self.words.saturating_add(u64::from(words));

        let elapsed_ms = now_ms.saturating_sub(self.started_ms);
        if elapsed_ms < WPM_REPORT_INTERVAL_MS {
            return None;
        }

        let elapsed_ms = elapsed_ms.max(1);
        let wpm_x100 = self.words * 6_000_000 / elapsed_ms;
        if self.words > 0 {
            info!(
                "effective_wpm={}.{:02} words={} elapsed_ms={}",
                wpm_x100 / 100,
                wpm_x100 % 100,
                self.words,
                elapsed_ms
            );
        }

        self.words = 0;
        self.started_ms = now_ms;
        Some(wpm_x100)
    }
}
