//! Report Trace
//!
//! Writes one CSV row per intensity report so a replayed recording can be
//! plotted or diffed afterwards:
//!
//! ```text
//! seconds,min_amplitude_gal,scale,intensity,decision
//! 0.000,0.0000,0.0000,0.0,below-threshold
//! 10.000,16.2311,3.3605,3.4,suppressed
//! ```
//!
//! `intensity` is the scale rounded the way it is published, whether or not
//! this report was published. `decision` is one of `published`,
//! `publish-failed`, `suppressed` or `below-threshold`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use shindo_core::{Intensity, PublishDecision, ReportOutcome, Timestamp};
use thiserror::Error;

/// Column names of the trace
pub const HEADER: [&str; 5] = ["seconds", "min_amplitude_gal", "scale", "intensity", "decision"];

/// Errors writing a trace
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Writing trace: {0}")]
    Csv(#[from] csv::Error),

    #[error("Flushing trace: {0}")]
    Flush(#[from] std::io::Error),
}

/// Short name of what happened to a report
pub fn decision_label(outcome: &ReportOutcome) -> &'static str {
    match outcome.decision {
        PublishDecision::Publish(_) if outcome.published => "published",
        PublishDecision::Publish(_) => "publish-failed",
        PublishDecision::Suppressed { .. } => "suppressed",
        PublishDecision::BelowThreshold => "below-threshold",
    }
}

/// CSV sink for report outcomes
pub struct TraceWriter<W: Write> {
    writer: Writer<W>,
    rows: u64,
}

impl TraceWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: Write> TraceWriter<W> {
    /// Wrap `inner` and write the header row
    pub fn from_writer(inner: W) -> Result<Self, TraceError> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Reports written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Append the report produced by the frame that started at `at`
    pub fn record(&mut self, at: Timestamp, outcome: &ReportOutcome) -> Result<(), TraceError> {
        let report = &outcome.report;
        self.writer.write_record([
            format!("{:.3}", at as f64 / 1e6),
            format!("{:.4}", report.min_amplitude),
            format!("{:.4}", report.scale),
            Intensity::from_scale(report.scale).to_string(),
            decision_label(outcome).to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Flush and hand back the inner writer
    pub fn finish(mut self) -> Result<W, TraceError> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| TraceError::Flush(std::io::Error::new(e.error().kind(), e.error().to_string())))
    }
}
