//! Shared fixtures for the integration tests
//!
//! Scripted channel readers that reproduce the shapes a seismometer sees on
//! the bench (a still table, a shaking table, a failing bus, a slow bus)
//! and an in-memory publisher that records every write.

#![allow(dead_code)]

use core::time::Duration;
use std::vec::Vec;

use shindo_core::prelude::*;
use shindo_core::Intensity;

/// Mid-scale ADC value of a level, still sensor
pub const REST: u16 = 2048;

/// Same value on every axis, forever
pub struct StillTable {
    pub raw: u16,
}

impl ChannelReader for StillTable {
    type Error = &'static str;

    fn read_axis(&mut self, _axis: Axis) -> nb::Result<u16, Self::Error> {
        Ok(self.raw)
    }
}

/// Square wave around `REST` on all three axes
///
/// The wave starts after `quiet_ticks` ticks at rest. A period of exactly
/// one second keeps the offset window mean at `REST` once it is full.
pub struct ShakeTable {
    pub amplitude: u16,
    pub period_ticks: u32,
    pub quiet_ticks: u32,
    tick: u32,
}

impl ShakeTable {
    pub fn new(amplitude: u16, period_ticks: u32, quiet_ticks: u32) -> Self {
        Self {
            amplitude,
            period_ticks,
            quiet_ticks,
            tick: 0,
        }
    }

    fn value(&self) -> u16 {
        if self.tick < self.quiet_ticks {
            return REST;
        }
        let phase = (self.tick - self.quiet_ticks) % self.period_ticks;
        if phase < self.period_ticks / 2 {
            REST + self.amplitude
        } else {
            REST - self.amplitude
        }
    }
}

impl ChannelReader for ShakeTable {
    type Error = &'static str;

    fn read_axis(&mut self, axis: Axis) -> nb::Result<u16, Self::Error> {
        let value = self.value();
        if axis == Axis::Z {
            self.tick += 1;
        }
        Ok(value)
    }
}

/// Reader whose bus dies after `healthy_reads` successful reads
pub struct FailingBus {
    pub healthy_reads: u32,
}

impl ChannelReader for FailingBus {
    type Error = &'static str;

    fn read_axis(&mut self, _axis: Axis) -> nb::Result<u16, Self::Error> {
        if self.healthy_reads == 0 {
            return Err(nb::Error::Other("spi transfer failed"));
        }
        self.healthy_reads -= 1;
        Ok(REST)
    }
}

/// Reader that spends `per_read` of virtual time on every conversion
pub struct SlowBus<'a> {
    pub clock: &'a MockClock,
    pub per_read: Duration,
}

impl ChannelReader for SlowBus<'_> {
    type Error = &'static str;

    fn read_axis(&mut self, _axis: Axis) -> nb::Result<u16, Self::Error> {
        self.clock.advance(self.per_read);
        Ok(REST)
    }
}

/// In-memory store recording every write
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub resets: u32,
    pub published: Vec<Intensity>,
    pub fail_reset: bool,
    pub fail_publish: bool,
}

impl RecordingStore {
    pub fn current(&self) -> Option<Intensity> {
        self.published.last().copied()
    }
}

impl Publisher for RecordingStore {
    type Error = &'static str;

    fn reset(&mut self) -> Result<(), Self::Error> {
        if self.fail_reset {
            return Err("store is read-only");
        }
        self.resets += 1;
        self.published.clear();
        Ok(())
    }

    fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
        if self.fail_publish {
            return Err("disk full");
        }
        self.published.push(intensity);
        Ok(())
    }
}
