//! Simulation time.
//!
//! Time is derived from the tick count, never from the wall clock, so a
//! replay with the same seed and the same input ticks is identical and tests
//! can run hours of game time instantly. `now_ms = ticks * 1000 / framerate`
//! in integer arithmetic: 12 ticks at 15 fps are exactly 800 ms.

/// Tick-counting clock
#[derive(Debug, Clone)]
pub struct SimClock {
    framerate: u64,
    ticks: u64,
}

impl SimClock {
    pub fn new(framerate: u32) -> Self {
        Self {
            framerate: framerate.max(1) as u64,
            ticks: 0,
        }
    }

    /// Advance by one tick (`dt = 1 / framerate`)
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Elapsed simulation time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.ticks.saturating_mul(1000) / self.framerate
    }
}

/// "Last fired" timestamp for a recurring event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cadence {
    last_ms: u64,
}

impl Cadence {
    pub fn new(now_ms: u64) -> Self {
        Self { last_ms: now_ms }
    }

    /// Restart the interval from `now_ms`
    pub fn rearm(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }

    /// Fire if at least `step_ms` passed since the last firing
    pub fn fire(&mut self, now_ms: u64, step_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_ms) >= step_ms {
            self.last_ms = now_ms;
            return true;
        }
        false
    }

    pub fn last_ms(&self) -> u64 {
        self.last_ms
    }
}
