//! Simulated Earthquake Example
//!
//! Runs the sampling loop for 40 seconds of virtual time against a
//! synthetic accelerometer: quiet, then a decaying 2 Hz shake, then quiet
//! again. Prints every report and what happened to it.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example simulated_quake
//! ```

use core::convert::Infallible;

use shindo_core::prelude::*;
use shindo_core::{Intensity, PublishDecision};

const REST: f32 = 2048.0;
const RATE_HZ: u32 = 200;

/// Shake starting at `onset` seconds with a 6 s decay
struct SyntheticQuake {
    tick: u32,
    onset: f32,
    peak_counts: f32,
}

impl ChannelReader for SyntheticQuake {
    type Error = Infallible;

    fn read_axis(&mut self, axis: Axis) -> nb::Result<u16, Self::Error> {
        let t = self.tick as f32 / RATE_HZ as f32;
        let mut value = REST;
        if t >= self.onset {
            let since = t - self.onset;
            let envelope = self.peak_counts * (-since / 6.0).exp();
            // horizontal axes lead the vertical one by a quarter period
            let phase = if axis == Axis::Z { 0.0 } else { core::f32::consts::FRAC_PI_2 };
            value += envelope * (2.0 * core::f32::consts::PI * 2.0 * since + phase).sin();
        }
        if axis == Axis::Z {
            self.tick += 1;
        }
        Ok(value.round().clamp(0.0, 4095.0) as u16)
    }
}

/// Publisher that prints instead of writing a file
struct Console;

impl Publisher for Console {
    type Error = Infallible;

    fn reset(&mut self) -> Result<(), Self::Error> {
        println!("value = 0");
        Ok(())
    }

    fn publish(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
        println!("value = {}", intensity);
        Ok(())
    }
}

fn main() {
    let clock = MockClock::new(0);
    let reader = SyntheticQuake { tick: 0, onset: 15.0, peak_counts: 400.0 };
    let mut meter = match Seismometer::new(SeismometerConfig::default(), reader, Console, &clock) {
        Ok(meter) => meter,
        Err(e) => {
            eprintln!("bad configuration: {e}");
            return;
        }
    };

    if let Err(e) = meter.start() {
        eprintln!("start failed: {e:?}");
        return;
    }

    for _ in 0..(40 * RATE_HZ) {
        let outcome = match meter.step() {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("loop stopped: {e:?}");
                return;
            }
        };

        if let Some(report) = outcome.report {
            let note = match report.decision {
                PublishDecision::Publish(i) => format!("published {i}"),
                PublishDecision::Suppressed { remaining } => format!("warm-up ({remaining} left)"),
                PublishDecision::BelowThreshold => String::from("quiet"),
            };
            println!(
                "t={:5.1}s  minA={:8.2} gal  scale={:5.2}  {}",
                clock.now() as f64 / 1e6,
                report.report.min_amplitude,
                report.report.scale,
                note
            );
        }
    }

    println!("{}", meter.stats());
}
