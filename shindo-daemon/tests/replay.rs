//! Daemon runs against recordings

use std::fs;
use std::process::Command;

use shindo_daemon::{run, DaemonSettings};

fn settings_in(dir: &std::path::Path) -> DaemonSettings {
    let mut settings = DaemonSettings::default();
    settings.output = dir.join("value.txt");
    settings.startup_delay_secs = 0;
    settings.shutdown_button.enabled = false;
    settings
}

#[test]
fn replay_returns_stats_when_recording_ends() {
    let dir = tempfile::tempdir().unwrap();
    let recording = dir.path().join("still.csv");
    fs::write(&recording, "2048,2048,2048\n".repeat(600)).unwrap();

    let settings = settings_in(dir.path());
    let stats = run::replay(&settings, &recording, None).unwrap();

    assert_eq!(stats.ticks, 600);
    assert_eq!(stats.reports, 3);
    assert_eq!(fs::read_to_string(&settings.output).unwrap(), "0");
}

#[test]
fn replay_trace_has_a_row_per_report() {
    let dir = tempfile::tempdir().unwrap();
    let recording = dir.path().join("still.csv");
    let trace = dir.path().join("trace.csv");
    fs::write(&recording, "2048,2048,2048\n".repeat(600)).unwrap();

    let stats = run::replay(&settings_in(dir.path()), &recording, Some(&trace)).unwrap();
    assert_eq!(stats.reports, 3);

    let text = fs::read_to_string(&trace).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "seconds,min_amplitude_gal,scale,intensity,decision");
    assert!(lines[1].starts_with("0.000,"), "{}", lines[1]);
    assert!(lines[2].starts_with("1.000,"), "{}", lines[2]);
    assert!(lines[3].starts_with("2.000,"), "{}", lines[3]);
    assert!(lines[1..].iter().all(|row| row.ends_with(",below-threshold")));
}

#[test]
fn malformed_recording_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let recording = dir.path().join("bad.csv");
    fs::write(&recording, "2048,2048,2048\n2048,oops,2048\n").unwrap();

    let err = run::replay(&settings_in(dir.path()), &recording, None).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Row 2"), "{message}");
}

#[test]
fn binary_exits_cleanly_after_replay() {
    let dir = tempfile::tempdir().unwrap();
    let recording = dir.path().join("still.csv");
    let output = dir.path().join("value.txt");
    fs::write(&recording, "2048,2048,2048\n".repeat(200)).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_seismometer"))
        .arg("--replay")
        .arg(&recording)
        .arg("--output")
        .arg(&output)
        .arg("--no-shutdown-button")
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "0");
}

#[test]
fn binary_writes_trace_next_to_value() {
    let dir = tempfile::tempdir().unwrap();
    let recording = dir.path().join("still.csv");
    let output = dir.path().join("value.txt");
    let trace = dir.path().join("trace.csv");
    fs::write(&recording, "2048,2048,2048\n".repeat(400)).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_seismometer"))
        .arg("--replay")
        .arg(&recording)
        .arg("--trace")
        .arg(&trace)
        .arg("--output")
        .arg(&output)
        .arg("--no-shutdown-button")
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(fs::read_to_string(&trace).unwrap().lines().count(), 3);
}

#[test]
fn binary_fails_on_bad_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.json");
    fs::write(&config, r#"{ "seismometer": { "sampling_rate_hz": 0 } }"#).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_seismometer"))
        .arg("--config")
        .arg(&config)
        .arg("--replay")
        .arg(dir.path().join("unused.csv"))
        .status()
        .unwrap();

    assert!(!status.success());
}
