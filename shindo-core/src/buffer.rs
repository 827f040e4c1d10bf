//! Prefilled Circular Buffer for Sample Windows
//!
//! ## Overview
//!
//! The sampling loop keeps two kinds of sliding windows:
//! - one window of raw ADC counts per axis (length = sampling rate), whose
//!   mean is the axis DC offset
//! - one window of composite magnitudes (length = 5 × sampling rate) that
//!   the intensity rank statistic is taken over
//!
//! Both are fixed-length rings that always hold exactly `len` values. They
//! start prefilled with a neutral value rather than empty, so the mean and
//! the rank statistic are defined from the very first tick.
//!
//! ## Why Not `VecDeque`?
//!
//! The window length is fixed at startup and never changes. A plain slice
//! plus a write cursor gives:
//! - O(1) overwrite of the oldest slot with no branch on "full"
//! - contiguous storage the estimator can copy with one `memcpy`
//! - a single allocation at startup and none in the hot path
//!
//! ### Memory Layout
//!
//! ```text
//! RingBuffer with len 5, after 7 pushes of a..g:
//! ┌───┬───┬───┬───┬───┐
//! │ f │ g │ c │ d │ e │  ← storage
//! └───┴───┴───┴───┴───┘
//!           ↑
//!           └── write_pos = 2 (oldest value, next to be overwritten)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use shindo_core::buffer::RingBuffer;
//!
//! let mut window = RingBuffer::new(4, 1.0);
//! assert_eq!(window.mean(), 1.0);
//!
//! for raw in [2048.0, 2050.0, 2046.0, 2048.0] {
//!     window.push(raw);
//! }
//! assert_eq!(window.mean(), 2048.0);
//! ```

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-length ring of `f32` samples that overwrites its oldest entry
///
/// ## Internal Invariants
///
/// - `data.len()` never changes after construction and is at least 1
/// - `write_pos < data.len()`
/// - `data[write_pos]` is the oldest value, `data[write_pos - 1]` the newest
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer {
    data: Vec<f32>,
    write_pos: usize,
}

impl RingBuffer {
    /// Creates a ring of `len` slots, every slot set to `fill`
    ///
    /// A zero `len` is bumped to 1 so the ring always has a newest value.
    pub fn new(len: usize, fill: f32) -> Self {
        Self {
            data: vec![fill; len.max(1)],
            write_pos: 0,
        }
    }

    /// Overwrites the oldest value with `value`
    pub fn push(&mut self, value: f32) {
        self.data[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.data.len();
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; the ring is never empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Most recently pushed value (the prefill value before any push)
    pub fn newest(&self) -> f32 {
        let idx = if self.write_pos == 0 { self.data.len() - 1 } else { self.write_pos - 1 };
        self.data[idx]
    }

    /// Arithmetic mean of every slot
    ///
    /// An O(n) scan on each call. The axis windows call it every tick so the
    /// offset follows slow drift of the sensor's zero point.
    pub fn mean(&self) -> f32 {
        let sum: f32 = self.data.iter().sum();
        sum / self.data.len() as f32
    }

    /// Raw storage in slot order (not chronological)
    ///
    /// Order-independent statistics (sum, rank) can use this directly.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &f32> + '_ {
        let (newer, older) = self.data.split_at(self.write_pos);
        older.iter().chain(newer.iter())
    }

    /// Position the next push will write to
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }
}
