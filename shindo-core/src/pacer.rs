//! Frame pacing and the overflow-safe tick counter
//!
//! The loop runs one frame per tick at a fixed target rate. Frame `n` is due
//! `n / rate` seconds after the epoch. After each frame the pacer tells the
//! loop how long to sleep until the next deadline; when the loop is behind
//! it gets no sleep and no catch-up, so late frames stay late and are never
//! skipped or doubled.
//!
//! ## State Machine
//!
//! ```text
//!            frame >= guard
//!  Running ─────────────────► WrapRealign
//!     ▲                           │
//!     └───────────────────────────┘
//!        frame = 1, epoch = now
//! ```
//!
//! The counter is re-anchored just under `i32::MAX`, so a counter stored as
//! a signed 32-bit integer never overflows (at 200 Hz that is every ~124
//! days). Resetting the epoch together with the counter keeps
//! `frame / rate` consistent with elapsed time across the wrap.

use core::time::Duration;

use crate::constants::time::{TICK_COUNTER_RESTART, US_PER_SECOND};
use crate::time::Timestamp;

/// Pacer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerState {
    /// Normal cadence
    Running,
    /// Counter hit the guard; re-anchoring the epoch
    WrapRealign,
}

/// Timing of one completed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    /// Counter value after the frame (the index the next frame runs as)
    pub frame: u32,
    /// Time to sleep before the next frame
    pub sleep: Duration,
    /// How far past its deadline the frame finished
    pub lag: Duration,
    /// The counter wrapped and the epoch was re-anchored
    pub wrapped: bool,
}

impl FrameTiming {
    /// True when the frame overran its deadline
    pub fn is_late(&self) -> bool {
        self.sleep.is_zero()
    }
}

/// Fixed-rate frame pacer
#[derive(Debug, Clone)]
pub struct FramePacer {
    rate_hz: u32,
    guard: u32,
    frame: u32,
    epoch: Timestamp,
    state: PacerState,
    wraps: u64,
}

impl FramePacer {
    /// Pacer at `rate_hz` starting at frame 0 with `epoch` as reference
    pub fn new(rate_hz: u32, guard: u32, epoch: Timestamp) -> Self {
        Self {
            rate_hz: rate_hz.max(1),
            guard: guard.max(TICK_COUNTER_RESTART + 1),
            frame: 0,
            epoch,
            state: PacerState::Running,
            wraps: 0,
        }
    }

    /// Index of the frame currently running
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    pub fn state(&self) -> PacerState {
        self.state
    }

    /// Number of counter wraps so far
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// True on frames aligned to `interval` (frame 0 included)
    pub fn is_report_frame(&self, interval: u32) -> bool {
        interval != 0 && self.frame % interval == 0
    }

    /// Deadline of `frame` relative to the epoch (microseconds)
    pub fn deadline_us(&self, frame: u32) -> Timestamp {
        u64::from(frame) * US_PER_SECOND / u64::from(self.rate_hz)
    }

    /// Restart the timeline at `now` without touching the counter
    ///
    /// Used once before the first frame so setup time does not count as lag.
    pub fn reanchor(&mut self, now: Timestamp) {
        self.epoch = now.saturating_sub(self.deadline_us(self.frame));
    }

    /// Close the current frame at time `now`
    pub fn end_frame(&mut self, now: Timestamp) -> FrameTiming {
        self.frame += 1;
        let deadline = self.deadline_us(self.frame);
        let elapsed = now.saturating_sub(self.epoch);

        let (sleep, lag) = if deadline > elapsed {
            (Duration::from_micros(deadline - elapsed), Duration::ZERO)
        } else {
            (Duration::ZERO, Duration::from_micros(elapsed - deadline))
        };

        let wrapped = self.frame >= self.guard;
        if wrapped {
            self.state = PacerState::WrapRealign;
            self.realign(now);
        }

        FrameTiming {
            frame: self.frame,
            sleep,
            lag,
            wrapped,
        }
    }

    fn realign(&mut self, now: Timestamp) {
        debug_assert_eq!(self.state, PacerState::WrapRealign);
        self.epoch = now;
        self.frame = TICK_COUNTER_RESTART;
        self.wraps += 1;
        self.state = PacerState::Running;
    }

    #[cfg(test)]
    fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }
}
