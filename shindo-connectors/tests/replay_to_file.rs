//! Replaying a recording from disk into the value file

use std::fmt::Write as _;
use std::fs;

use shindo_connectors::{FilePublisher, ReplayError, ReplayReader};
use shindo_core::prelude::*;

/// 10 s at rest, then 10 s of a 1 Hz square wave of +-100 counts
fn shake_recording() -> String {
    let mut csv = String::new();
    for tick in 0..4000u32 {
        let value = if tick < 2000 {
            2048
        } else if (tick - 2000) % 200 < 100 {
            2148
        } else {
            1948
        };
        writeln!(csv, "{value},{value},{value}").unwrap();
    }
    csv
}

#[test]
fn recording_ends_with_published_intensity() {
    let dir = tempfile::tempdir().unwrap();
    let recording = dir.path().join("shake.csv");
    let value_file = dir.path().join("value.txt");
    fs::write(&recording, shake_recording()).unwrap();

    let clock = MockClock::new(0);
    let mut meter = Seismometer::new(
        SeismometerConfig::default(),
        ReplayReader::open(&recording).unwrap(),
        FilePublisher::new(&value_file),
        &clock,
    )
    .unwrap();

    let err = meter.run().unwrap_err();
    assert!(matches!(
        err,
        RunError::Sensor { axis: Axis::X, error: ReplayError::Exhausted { rows: 4000 } }
    ));

    let stats = *meter.stats();
    assert_eq!(stats.ticks, 4000);
    assert_eq!(stats.publishes, 8);
    assert_eq!(fs::read_to_string(&value_file).unwrap(), "5.5");
    // virtual time: the replay took no wall-clock time to cover 20 s
    assert_eq!(clock.now(), 20_000_000);
}

#[test]
fn quiet_recording_leaves_reset_value() {
    let dir = tempfile::tempdir().unwrap();
    let value_file = dir.path().join("value.txt");
    fs::write(&value_file, "4.2").unwrap();

    let recording = "2048,2048,2048\n".repeat(1000);
    let clock = MockClock::new(0);
    let mut meter = Seismometer::new(
        SeismometerConfig::default(),
        ReplayReader::from_reader(recording.as_bytes()),
        FilePublisher::new(&value_file),
        &clock,
    )
    .unwrap();

    assert!(meter.run().is_err());
    assert_eq!(fs::read_to_string(&value_file).unwrap(), "0");
}

#[test]
fn missing_recording_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReplayReader::open(dir.path().join("absent.csv")).err().unwrap();
    assert!(matches!(err, ReplayError::Csv(_)));
}
