//! Fixed-interval autosave ticker.
//!
//! The host drives the ticker from its event loop; every firing becomes a
//! `requestSave` message to the whiteboard, whether or not anything changed.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default autosave interval.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(3);

/// Fires once per elapsed interval.
#[derive(Debug, Clone)]
pub struct AutoSaveTicker {
    interval: Duration,
    last_tick: Instant,
}

impl Default for AutoSaveTicker {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_INTERVAL)
    }
}

impl AutoSaveTicker {
    /// Start a ticker whose first firing is one interval from now.
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_tick: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// When the next firing is due.
    pub fn next_deadline(&self) -> Instant {
        self.last_tick + self.interval
    }

    /// Check the clock now. Returns true if the ticker fired.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Check against a given time. Returns true if the ticker fired.
    ///
    /// Missed intervals collapse into one firing.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }
        self.last_tick = now;
        true
    }
}
