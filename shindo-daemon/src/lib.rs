//! Seismometer daemon
//!
//! Reads deployment settings, applies command line overrides and runs the
//! sampling loop against either the live ADC or a CSV recording.

pub mod cli;
pub mod run;
pub mod settings;

pub use cli::Args;
pub use settings::DaemonSettings;
