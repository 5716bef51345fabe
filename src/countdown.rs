use std::time::Duration;

/// One-shot per-second countdown. Ticks down from the configured duration
/// and fires exactly once when it reaches zero; later ticks are no-ops.
/// There is no cancellation path: it runs to completion or the process exits.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration_secs: u64,
    remaining_secs: u64,
    fired: bool,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        let secs = duration.as_secs();
        Self {
            duration_secs: secs,
            remaining_secs: secs,
            fired: false,
        }
    }

    /// Advance by one second. Returns true on the tick that brings the
    /// remaining time to zero, and only on that tick.
    pub fn tick(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Remaining time as `mm:ss` for the composing header.
    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}
