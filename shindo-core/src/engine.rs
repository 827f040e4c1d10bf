//! The sampling loop
//!
//! `Seismometer` owns every piece of mutable state the loop needs and drives
//! one frame per tick:
//!
//! ```text
//!  ┌───────────────────────────── one frame ─────────────────────────────┐
//!  │ read X,Y,Z ─► AxisBank ─► composite magnitude ─► history            │
//!  │                                                    │ (report frame) │
//!  │                                                    ▼                │
//!  │                              estimate ─► SuppressionGate ─► publish │
//!  └──────────────────────────────────┬──────────────────────────────────┘
//!                                     ▼
//!                         FramePacer ─► sleep until next deadline
//! ```
//!
//! There is exactly one mutator of this state, so nothing here is shared or
//! locked. A shutdown signal terminates the process from outside the loop
//! and never touches it.
//!
//! ## Example
//!
//! ```rust
//! use shindo_core::prelude::*;
//! use shindo_core::intensity::Intensity;
//!
//! struct Still;
//! impl ChannelReader for Still {
//!     type Error = core::convert::Infallible;
//!     fn read_axis(&mut self, _axis: Axis) -> nb::Result<u16, Self::Error> {
//!         Ok(2048)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Memory(Option<Intensity>);
//! impl Publisher for Memory {
//!     type Error = core::convert::Infallible;
//!     fn reset(&mut self) -> Result<(), Self::Error> {
//!         self.0 = None;
//!         Ok(())
//!     }
//!     fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
//!         self.0 = Some(intensity);
//!         Ok(())
//!     }
//! }
//!
//! let clock = MockClock::new(0);
//! let mut meter = Seismometer::new(SeismometerConfig::default(), Still, Memory::default(), &clock)
//!     .unwrap();
//! meter.start().unwrap();
//! meter.run_ticks(2_000).unwrap();
//!
//! assert_eq!(meter.stats().reports, 10);
//! assert_eq!(clock.now(), 10_000_000);
//! ```

use core::convert::Infallible;
use core::fmt;

use crate::config::SeismometerConfig;
use crate::errors::{ConfigError, RunError};
use crate::filter::AxisBank;
use crate::intensity::{Intensity, IntensityEstimator, IntensityReport, PublishDecision, SuppressionGate};
use crate::magnitude::composite_magnitude;
use crate::pacer::{FramePacer, FrameTiming};
use crate::traits::{Axis, ChannelReader, Publisher, Sleeper, TimeSource};

/// Counters kept over the lifetime of the loop
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Frames completed
    pub ticks: u64,
    /// Frames that finished past their deadline
    pub late_ticks: u64,
    /// Intensity evaluations
    pub reports: u64,
    /// Successful publishes
    pub publishes: u64,
    /// Qualifying reports dropped during warm-up
    pub suppressed: u64,
    /// Publishes the store rejected
    pub publish_failures: u64,
    /// Tick counter wraps
    pub wraps: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} late={} reports={} published={} suppressed={} failed={} wraps={}",
            self.ticks,
            self.late_ticks,
            self.reports,
            self.publishes,
            self.suppressed,
            self.publish_failures,
            self.wraps
        )
    }
}

/// Outcome of one intensity report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOutcome {
    pub report: IntensityReport,
    pub decision: PublishDecision,
    /// The publisher accepted the value
    pub published: bool,
}

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Raw samples read this frame
    pub raw: [u16; 3],
    /// Composite magnitude written to the history (gal)
    pub magnitude: f32,
    /// Present on report frames
    pub report: Option<ReportOutcome>,
    pub timing: FrameTiming,
}

/// Seismic intensity meter driving the sampling loop
pub struct Seismometer<R, P, C> {
    config: SeismometerConfig,
    bank: AxisBank,
    estimator: IntensityEstimator,
    gate: SuppressionGate,
    pacer: FramePacer,
    report_interval: u32,
    reader: R,
    publisher: P,
    clock: C,
    stats: RunStats,
    last_published: Option<Intensity>,
}

impl<R, P, C> Seismometer<R, P, C>
where
    R: ChannelReader,
    R::Error: fmt::Debug,
    P: Publisher,
    P::Error: fmt::Debug,
    C: TimeSource + Sleeper,
{
    /// Build the loop state; every buffer is allocated here and nowhere else
    pub fn new(config: SeismometerConfig, reader: R, publisher: P, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let pacer = FramePacer::new(config.sampling_rate_hz, config.tick_guard, clock.now());

        Ok(Self {
            bank: AxisBank::new(config.window_len(), config.smoothing_retain),
            estimator: IntensityEstimator::new(config.history_len(), config.continuity_len()),
            gate: SuppressionGate::new(config.startup_suppression, config.publish_threshold),
            report_interval: config.report_interval_ticks(),
            pacer,
            config,
            reader,
            publisher,
            clock,
            stats: RunStats::default(),
            last_published: None,
        })
    }

    /// Reset the published value to `"0"` and anchor the timeline at now
    pub fn start(&mut self) -> Result<(), RunError<R::Error, P::Error>> {
        self.publisher.reset().map_err(RunError::Reset)?;
        self.pacer.reanchor(self.clock.now());
        log_info!(
            "Sampling at {} Hz, reporting every {} frames",
            self.config.sampling_rate_hz,
            self.report_interval
        );
        Ok(())
    }

    /// Run forever; only returns on a fatal error
    pub fn run(&mut self) -> Result<Infallible, RunError<R::Error, P::Error>> {
        self.start()?;
        loop {
            self.step()?;
        }
    }

    /// Run `ticks` frames (after `start`)
    pub fn run_ticks(&mut self, ticks: u64) -> Result<(), RunError<R::Error, P::Error>> {
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(())
    }

    /// Run one frame: sample, filter, maybe report, then pace
    pub fn step(&mut self) -> Result<TickOutcome, RunError<R::Error, P::Error>> {
        let report_frame = self.pacer.is_report_frame(self.report_interval);

        let raw = self.sample()?;
        for axis in Axis::ALL {
            self.bank.record(axis, raw[axis.index()]);
        }

        let magnitude = composite_magnitude(self.bank.corrected(), self.config.adc_to_gal);
        self.estimator.push(magnitude);

        let report = if report_frame { Some(self.report()) } else { None };

        let now = self.clock.now();
        let timing = self.pacer.end_frame(now);
        self.stats.ticks += 1;

        if timing.wrapped {
            self.stats.wraps += 1;
            log_info!("Tick counter wrapped, timeline re-anchored at {} us", now);
        }

        if timing.is_late() {
            self.stats.late_ticks += 1;
            log_trace!("Frame {} finished {:?} late", timing.frame, timing.lag);
        } else {
            self.clock.sleep(timing.sleep);
        }

        Ok(TickOutcome {
            raw,
            magnitude,
            report,
            timing,
        })
    }

    /// Read all three axes before touching any filter state
    fn sample(&mut self) -> Result<[u16; 3], RunError<R::Error, P::Error>> {
        let mut raw = [0u16; 3];
        for axis in Axis::ALL {
            raw[axis.index()] = nb::block!(self.reader.read_axis(axis))
                .map_err(|error| RunError::Sensor { axis, error })?;
        }
        Ok(raw)
    }

    fn report(&mut self) -> ReportOutcome {
        let report = self.estimator.estimate();
        let decision = self.gate.evaluate(report.scale);
        self.stats.reports += 1;

        let mut published = false;
        match decision {
            PublishDecision::Publish(intensity) => match self.publisher.publish(intensity) {
                Ok(()) => {
                    published = true;
                    self.stats.publishes += 1;
                    self.last_published = Some(intensity);
                    log_info!("Intensity {} (minA {:.2} gal)", intensity, report.min_amplitude);
                }
                Err(error) => {
                    self.stats.publish_failures += 1;
                    log_warn!("Publishing intensity {} failed: {:?}", intensity, error);
                }
            },
            PublishDecision::Suppressed { remaining } => {
                self.stats.suppressed += 1;
                log_debug!("Warm-up: dropped intensity {:.2}, {} to go", report.scale, remaining);
            }
            PublishDecision::BelowThreshold => {}
        }

        log_debug!("scale: {:.2}, frame: {}", report.scale, self.pacer.frame());

        ReportOutcome {
            report,
            decision,
            published,
        }
    }

    pub fn config(&self) -> &SeismometerConfig {
        &self.config
    }

    pub fn bank(&self) -> &AxisBank {
        &self.bank
    }

    pub fn estimator(&self) -> &IntensityEstimator {
        &self.estimator
    }

    pub fn gate(&self) -> &SuppressionGate {
        &self.gate
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Last value the publisher accepted during this run
    pub fn last_published(&self) -> Option<Intensity> {
        self.last_published
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
