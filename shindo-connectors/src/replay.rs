//! Recorded Waveform Replay
//!
//! Feeds a CSV recording of raw ADC samples through the loop instead of the
//! live converter. Each row is one tick:
//!
//! ```text
//! 2051,2047,2612
//! 2049,2046,2610
//! ```
//!
//! Three columns (X, Y, Z), no header. Values may be written as decimals
//! and are rounded to the nearest count; anything outside the 12-bit range
//! is rejected rather than clamped. When the rows run out the reader
//! returns [`ReplayError::Exhausted`], which ends the run.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter};
use log::info;
use shindo_core::constants::{ADC_MAX_VALUE, AXIS_COUNT};
use shindo_core::traits::{Axis, ChannelReader};
use thiserror::Error;

/// Errors reading a recording
#[derive(Debug, Error)]
pub enum ReplayError {
    /// No rows left
    #[error("Recording exhausted after {rows} rows")]
    Exhausted { rows: u64 },

    /// Malformed CSV or I/O failure
    #[error("Reading recording: {0}")]
    Csv(#[from] csv::Error),

    /// Wrong column count or a non-numeric field
    #[error("Row {row}: {reason}")]
    Parse { row: u64, reason: String },

    /// Sample outside the converter range
    #[error("Row {row}: {value} is outside 0..={}", ADC_MAX_VALUE)]
    OutOfRange { row: u64, value: f64 },
}

impl ReplayError {
    /// True when the recording simply ended
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}

/// Channel reader backed by a CSV recording
pub struct ReplayReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    current: [u16; AXIS_COUNT],
    rows: u64,
}

impl ReplayReader<File> {
    /// Open a recording on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(csv::Error::from)?;
        info!("Replaying {}", path.display());
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> ReplayReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_records();

        Self {
            records,
            current: [0; AXIS_COUNT],
            rows: 0,
        }
    }

    /// Rows consumed so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    fn next_row(&mut self) -> Result<[u16; AXIS_COUNT], ReplayError> {
        let record = match self.records.next() {
            Some(record) => record?,
            None => return Err(ReplayError::Exhausted { rows: self.rows }),
        };
        let row = self.rows + 1;

        if record.len() != AXIS_COUNT {
            return Err(ReplayError::Parse {
                row,
                reason: format!("expected {} columns, found {}", AXIS_COUNT, record.len()),
            });
        }

        let mut values = [0u16; AXIS_COUNT];
        for (slot, field) in values.iter_mut().zip(record.iter()) {
            let value: f64 = field.parse().map_err(|_| ReplayError::Parse {
                row,
                reason: format!("{field:?} is not a number"),
            })?;
            let rounded = value.round();
            if !(0.0..=f64::from(ADC_MAX_VALUE)).contains(&rounded) {
                return Err(ReplayError::OutOfRange { row, value });
            }
            *slot = rounded as u16;
        }

        self.rows = row;
        Ok(values)
    }
}

impl<R: Read> ChannelReader for ReplayReader<R> {
    type Error = ReplayError;

    /// A new row is consumed whenever the X axis is read
    fn read_axis(&mut self, axis: Axis) -> nb::Result<u16, Self::Error> {
        if axis == Axis::X {
            self.current = self.next_row().map_err(nb::Error::Other)?;
        }
        Ok(self.current[axis.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_tick<R: Read>(reader: &mut ReplayReader<R>) -> Result<[u16; 3], ReplayError> {
        let mut out = [0; 3];
        for axis in Axis::ALL {
            out[axis.index()] = nb::block!(reader.read_axis(axis))?;
        }
        Ok(out)
    }

    #[test]
    fn rows_map_to_ticks() {
        let data = "2051,2047,2612\n 2049.6 , 2046 , 2610\n";
        let mut reader = ReplayReader::from_reader(data.as_bytes());

        assert_eq!(read_tick(&mut reader).unwrap(), [2051, 2047, 2612]);
        assert_eq!(read_tick(&mut reader).unwrap(), [2050, 2046, 2610]);
        assert_eq!(reader.rows(), 2);

        let err = read_tick(&mut reader).unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.to_string(), "Recording exhausted after 2 rows");
    }

    #[test]
    fn rejects_wrong_column_count() {
        let mut reader = ReplayReader::from_reader("1,2\n".as_bytes());
        let err = read_tick(&mut reader).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { row: 1, .. }));
    }

    #[test]
    fn rejects_out_of_range_samples() {
        let mut reader = ReplayReader::from_reader("1,2,4096\n".as_bytes());
        let err = read_tick(&mut reader).unwrap_err();
        assert!(matches!(err, ReplayError::OutOfRange { row: 1, .. }));
        assert_eq!(err.to_string(), "Row 1: 4096 is outside 0..=4095");
    }

    #[test]
    fn rejects_text() {
        let mut reader = ReplayReader::from_reader("1,two,3\n".as_bytes());
        let err = read_tick(&mut reader).unwrap_err();
        assert_eq!(err.to_string(), "Row 1: \"two\" is not a number");
    }
}
