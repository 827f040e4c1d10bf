//! Per-Axis Offset Removal and Smoothing
//!
//! Each axis carries two pieces of state:
//!
//! 1. A one-second window of raw ADC counts. Its mean is the axis DC offset
//!    (gravity on the vertical axis, bias on all three). Recomputing it
//!    every tick tracks slow drift of the zero point with temperature.
//! 2. A one-pole exponential filter over the raw counts that removes ADC
//!    noise above a few hertz.
//!
//! The corrected value is `smoothed - offset`: the dynamic part of the
//! acceleration in ADC counts.
//!
//! ```text
//! raw ──┬──► window ──► mean ──────────────┐
//!       │                                  ▼
//!       └──► smoothed = s·a + raw·(1-a) ──► (−) ──► corrected
//! ```

use crate::buffer::RingBuffer;
use crate::constants::{SMOOTHING_RETAIN, WINDOW_PREFILL};
use crate::traits::Axis;

/// One-pole low-pass filter, `y[n] = a·y[n-1] + (1-a)·x[n]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingFilter {
    retain: f32,
    state: f32,
}

impl SmoothingFilter {
    /// Filter with retain factor `retain` starting from 0
    pub fn new(retain: f32) -> Self {
        Self { retain, state: 0.0 }
    }

    /// Feed one sample and return the new state
    pub fn update(&mut self, sample: f32) -> f32 {
        self.state = self.state * self.retain + sample * (1.0 - self.retain);
        self.state
    }

    /// Current state
    pub fn value(&self) -> f32 {
        self.state
    }
}

impl Default for SmoothingFilter {
    fn default() -> Self {
        Self::new(SMOOTHING_RETAIN)
    }
}

/// Offset window and smoothing state of one axis
#[derive(Debug, Clone)]
pub struct AxisFilter {
    window: RingBuffer,
    smoothing: SmoothingFilter,
}

impl AxisFilter {
    pub fn new(window_len: usize, retain: f32) -> Self {
        Self {
            window: RingBuffer::new(window_len, WINDOW_PREFILL),
            smoothing: SmoothingFilter::new(retain),
        }
    }

    /// Store a raw sample and update the smoothed state with it
    pub fn record(&mut self, raw: f32) {
        self.window.push(raw);
        self.smoothing.update(self.window.newest());
    }

    /// Mean of the raw window (DC offset estimate)
    pub fn offset(&self) -> f32 {
        self.window.mean()
    }

    /// Smoothed raw value
    pub fn smoothed(&self) -> f32 {
        self.smoothing.value()
    }

    /// Smoothed value minus the offset
    pub fn corrected(&self) -> f32 {
        self.smoothed() - self.offset()
    }

    pub fn window(&self) -> &RingBuffer {
        &self.window
    }
}

/// The three axis filters of the accelerometer
#[derive(Debug, Clone)]
pub struct AxisBank {
    axes: [AxisFilter; 3],
}

impl AxisBank {
    /// Bank whose windows hold `window_len` samples each
    pub fn new(window_len: usize, retain: f32) -> Self {
        Self {
            axes: core::array::from_fn(|_| AxisFilter::new(window_len, retain)),
        }
    }

    /// Append a raw sample for `axis` and update its smoothed state
    pub fn record(&mut self, axis: Axis, raw: u16) {
        self.axes[axis.index()].record(f32::from(raw));
    }

    /// DC offset of `axis`
    pub fn offset(&self, axis: Axis) -> f32 {
        self.axes[axis.index()].offset()
    }

    /// Offset-corrected smoothed value of `axis` in ADC counts
    pub fn corrected_value(&self, axis: Axis) -> f32 {
        self.axes[axis.index()].corrected()
    }

    /// Corrected values of all axes in X, Y, Z order
    pub fn corrected(&self) -> [f32; 3] {
        Axis::ALL.map(|axis| self.corrected_value(axis))
    }

    pub fn axis(&self, axis: Axis) -> &AxisFilter {
        &self.axes[axis.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_uses_fixed_split() {
        let mut filter = SmoothingFilter::new(0.94);
        let y = filter.update(100.0);
        assert!((y - 6.0).abs() < 1e-4);

        let y = filter.update(100.0);
        assert!((y - (6.0 * 0.94 + 6.0)).abs() < 1e-4);
    }

    #[test]
    fn smoothing_converges_to_constant_input() {
        let mut filter = SmoothingFilter::default();
        for _ in 0..400 {
            filter.update(2048.0);
        }
        // 0.94^400 ≈ 1.9e-11
        assert!((filter.value() - 2048.0).abs() < 0.01);
    }

    #[test]
    fn offset_is_window_mean() {
        let mut bank = AxisBank::new(4, 0.94);
        for raw in [10, 20, 30, 40] {
            bank.record(Axis::X, raw);
        }
        assert_eq!(bank.offset(Axis::X), 25.0);
        // other axes untouched
        assert_eq!(bank.offset(Axis::Y), 1.0);
    }

    #[test]
    fn offset_tracks_last_window_after_wrap() {
        let mut bank = AxisBank::new(3, 0.94);
        for raw in [100, 200, 300, 400, 500] {
            bank.record(Axis::Z, raw);
        }
        assert_eq!(bank.offset(Axis::Z), 400.0);

        let window = bank.axis(Axis::Z).window();
        assert_eq!(window.newest(), 500.0);
        let chronological: [f32; 3] = core::array::from_fn(|i| *window.iter().nth(i).unwrap());
        assert_eq!(chronological, [300.0, 400.0, 500.0]);
    }

    #[test]
    fn corrected_is_smoothed_minus_offset() {
        let mut bank = AxisBank::new(2, 0.5);
        bank.record(Axis::Y, 10);
        // window [10, 1] -> 5.5, smoothed 0*0.5 + 10*0.5 = 5
        assert!((bank.corrected_value(Axis::Y) - (5.0 - 5.5)).abs() < 1e-6);
    }

    #[test]
    fn steady_signal_corrects_to_zero() {
        let mut bank = AxisBank::new(200, 0.94);
        for _ in 0..2000 {
            for axis in Axis::ALL {
                bank.record(axis, 2048);
            }
        }
        for value in bank.corrected() {
            assert!(value.abs() < 0.01, "corrected value {value}");
        }
    }
}
