//! Wiring the loop to its adapters

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use shindo_connectors::{FilePublisher, ReplayReader, TraceWriter};
use shindo_core::prelude::*;

use crate::settings::DaemonSettings;

/// Run a recording through the loop on virtual time
///
/// Returns once the recording is exhausted. With `trace`, every report is
/// also written as a CSV row to that file.
pub fn replay(settings: &DaemonSettings, recording: &Path, trace: Option<&Path>) -> Result<RunStats> {
    let reader = ReplayReader::open(recording)
        .with_context(|| format!("Opening recording {}", recording.display()))?;
    let publisher = FilePublisher::new(&settings.output);
    let clock = MockClock::new(0);

    let mut trace = match trace {
        Some(path) => Some(
            TraceWriter::create(path).with_context(|| format!("Creating trace {}", path.display()))?,
        ),
        None => None,
    };

    let mut meter = Seismometer::new(settings.seismometer.clone(), reader, publisher, &clock)?;
    meter.start()?;
    let err = loop {
        let frame_start = clock.now();
        match meter.step() {
            Ok(outcome) => {
                if let (Some(report), Some(trace)) = (outcome.report, trace.as_mut()) {
                    trace.record(frame_start, &report)?;
                }
            }
            Err(err) => break err,
        }
    };

    let stats = *meter.stats();
    let exhausted = err.sensor_error().is_some_and(|e| e.is_exhausted());
    if !exhausted {
        warn!("Replay stopped: {}", stats);
        return Err(anyhow::Error::new(err).context(format!("Replaying {}", recording.display())));
    }

    if let Some(trace) = trace {
        let rows = trace.rows();
        trace.finish()?;
        info!("Wrote {} report rows", rows);
    }

    info!(
        "Replay of {} finished after {:.1} s of signal: {}",
        recording.display(),
        clock.now() as f64 / 1e6,
        stats
    );
    Ok(stats)
}

/// Sample the live ADC until the sensor fails
#[cfg(feature = "raspberry-pi")]
pub fn live(settings: &DaemonSettings) -> Result<RunStats> {
    use shindo_connectors::{Mcp3204Reader, ShutdownAction, ShutdownButton};

    let delay = settings.startup_delay();
    if !delay.is_zero() {
        info!("Waiting {:?} for the hardware to settle", delay);
        std::thread::sleep(delay);
    }

    // dropping the button disarms it, so it lives as long as the loop
    let _button = if settings.shutdown_button.enabled {
        let button = &settings.shutdown_button;
        let action = ShutdownAction::from_command_line(&button.command)?;
        Some(
            ShutdownButton::arm(button.pin, button.debounce(), action)
                .context("Arming shutdown button")?,
        )
    } else {
        info!("Shutdown button disabled");
        None
    };

    let reader = Mcp3204Reader::open((&settings.spi).into()).context("Opening ADC")?;
    let file = FilePublisher::new(&settings.output);
    live_with_display(settings, reader, file)
}

#[cfg(feature = "display")]
fn live_with_display(
    settings: &DaemonSettings,
    reader: shindo_connectors::Mcp3204Reader,
    file: FilePublisher,
) -> Result<RunStats> {
    use shindo_connectors::{OledPublisher, Tee};

    if !settings.display.enabled {
        return sample(settings, reader, file);
    }
    let panel = OledPublisher::open(&settings.display.i2c_device).context("Opening OLED display")?;
    sample(settings, reader, Tee::new(file, panel))
}

#[cfg(all(feature = "raspberry-pi", not(feature = "display")))]
fn live_with_display(
    settings: &DaemonSettings,
    reader: shindo_connectors::Mcp3204Reader,
    file: FilePublisher,
) -> Result<RunStats> {
    if settings.display.enabled {
        anyhow::bail!("The OLED display needs the display feature");
    }
    sample(settings, reader, file)
}

#[cfg(feature = "raspberry-pi")]
fn sample<P>(settings: &DaemonSettings, reader: shindo_connectors::Mcp3204Reader, publisher: P) -> Result<RunStats>
where
    P: Publisher,
    P::Error: std::error::Error + Send + Sync + 'static,
{
    let clock = MonotonicClock::new();
    let mut meter = Seismometer::new(settings.seismometer.clone(), reader, publisher, clock)?;
    let err = match meter.run() {
        Ok(never) => match never {},
        Err(err) => err,
    };

    warn!("Sampling stopped: {}", meter.stats());
    Err(anyhow::Error::new(err).context("Sampling loop failed"))
}

#[cfg(not(feature = "raspberry-pi"))]
pub fn live(_settings: &DaemonSettings) -> Result<RunStats> {
    anyhow::bail!("Live sampling needs the raspberry-pi feature; use --replay to run a recording")
}
