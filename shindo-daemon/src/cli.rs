//! Command line

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::settings::DaemonSettings;

#[derive(Parser, Debug)]
#[command(name = "seismometer")]
#[command(about = "Estimate seismic intensity from a 3-axis accelerometer", long_about = None)]
#[command(version)]
pub struct Args {
    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File the intensity is written to
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Replay a CSV recording (X,Y,Z per row) instead of reading the ADC
    #[arg(long, value_name = "CSV")]
    pub replay: Option<PathBuf>,

    /// Write one CSV row per report of the replay
    #[arg(long, value_name = "CSV", requires = "replay")]
    pub trace: Option<PathBuf>,

    /// Sampling rate in Hz
    #[arg(long, value_name = "HZ")]
    pub rate: Option<u32>,

    /// Seconds to wait before touching the hardware
    #[arg(long, value_name = "SECONDS")]
    pub startup_delay: Option<u64>,

    /// Do not arm the GPIO shutdown button
    #[arg(long, default_value_t = false)]
    pub no_shutdown_button: bool,

    /// Mirror the intensity on the OLED display
    #[arg(long, default_value_t = false)]
    pub display: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log level; `RUST_LOG` still takes precedence
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Command line values win over the settings file
    pub fn apply(&self, settings: &mut DaemonSettings) {
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(rate) = self.rate {
            settings.seismometer.sampling_rate_hz = rate;
        }
        if let Some(delay) = self.startup_delay {
            settings.startup_delay_secs = delay;
        }
        if self.no_shutdown_button {
            settings.shutdown_button.enabled = false;
        }
        if self.display {
            settings.display.enabled = true;
        }
    }
}
