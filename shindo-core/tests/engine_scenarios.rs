//! End-to-end runs of the sampling loop on a virtual clock
//!
//! Covers:
//! - Startup transient and warm-up suppression
//! - Publishing a sustained shake
//! - Pacing when the bus is slower than the frame period
//! - Tick counter wrap
//! - Sensor, reset and publish failures

mod common;

use core::time::Duration;

use shindo_core::prelude::*;
use shindo_core::{Intensity, PublishDecision};

use common::{FailingBus, RecordingStore, ShakeTable, SlowBus, StillTable, REST};

const TICKS_PER_SECOND: u64 = 200;

#[test]
fn still_table_never_publishes() {
    let clock = MockClock::new(0);
    let mut meter = Seismometer::new(
        SeismometerConfig::default(),
        StillTable { raw: REST },
        RecordingStore::default(),
        &clock,
    )
    .unwrap();

    meter.start().unwrap();
    meter.run_ticks(15 * TICKS_PER_SECOND).unwrap();

    let stats = *meter.stats();
    assert_eq!(stats.reports, 15);
    assert_eq!(stats.publishes, 0);
    // the prefilled offset windows swing hard for the first second; that
    // swing is visible to the five reports whose history still holds it
    assert_eq!(stats.suppressed, 5);
    assert_eq!(meter.gate().remaining(), 2);
    assert_eq!(meter.publisher().resets, 1);
    assert!(meter.publisher().published.is_empty());
}

#[test]
fn sustained_shake_is_published_after_warm_up() {
    let clock = MockClock::new(0);
    let mut meter = Seismometer::new(
        SeismometerConfig::default(),
        ShakeTable::new(100, 200, 2000),
        RecordingStore::default(),
        &clock,
    )
    .unwrap();

    meter.start().unwrap();
    meter.run_ticks(20 * TICKS_PER_SECOND).unwrap();

    let stats = *meter.stats();
    assert_eq!(stats.reports, 20);
    assert_eq!(stats.suppressed, 6);
    assert_eq!(stats.publishes, 8);
    assert!(meter.gate().is_open());

    let published = &meter.publisher().published;
    assert_eq!(published.len(), 8);
    let first = published[0].as_f32();
    assert!((5.4..=5.7).contains(&first), "first published intensity {first}");

    // once the onset has left the history the shake reads as a steady 5.5
    assert_eq!(meter.last_published(), Some(Intensity::from_tenths(55)));
    assert_eq!(meter.publisher().current(), meter.last_published());
}

#[test]
fn report_outcome_carries_decision() {
    let clock = MockClock::new(0);
    let config = SeismometerConfig::default().with_startup_suppression(0);
    let mut meter =
        Seismometer::new(config, ShakeTable::new(100, 200, 2000), RecordingStore::default(), &clock)
            .unwrap();
    meter.start().unwrap();

    let mut decisions = Vec::new();
    for _ in 0..(20 * TICKS_PER_SECOND) {
        let outcome = meter.step().unwrap();
        if let Some(report) = outcome.report {
            decisions.push(report.decision);
            assert_eq!(report.published, matches!(report.decision, PublishDecision::Publish(_)));
        }
    }

    assert_eq!(decisions.len(), 20);
    assert_eq!(decisions[0], PublishDecision::BelowThreshold);
    assert!(matches!(decisions[1], PublishDecision::Publish(_)));
    assert!(!decisions.iter().any(|d| matches!(d, PublishDecision::Suppressed { .. })));
}

#[test]
fn idle_loop_keeps_wall_clock_cadence() {
    let clock = MockClock::new(7_000_000);
    let mut meter = Seismometer::new(
        SeismometerConfig::default(),
        StillTable { raw: REST },
        RecordingStore::default(),
        &clock,
    )
    .unwrap();

    meter.start().unwrap();
    meter.run_ticks(2 * TICKS_PER_SECOND).unwrap();

    assert_eq!(clock.now(), 9_000_000);
    assert_eq!(clock.sleep_count(), 400);
    assert_eq!(meter.stats().late_ticks, 0);
}

#[test]
fn processing_time_is_absorbed_by_the_sleep() {
    let clock = MockClock::new(0);
    let bus = SlowBus { clock: &clock, per_read: Duration::from_millis(1) };
    let mut meter =
        Seismometer::new(SeismometerConfig::default(), bus, RecordingStore::default(), &clock).unwrap();

    meter.start().unwrap();
    meter.run_ticks(TICKS_PER_SECOND).unwrap();

    assert_eq!(clock.now(), 1_000_000);
    assert_eq!(clock.last_sleep(), Some(Duration::from_millis(2)));
    assert_eq!(meter.stats().late_ticks, 0);
}

#[test]
fn slow_bus_runs_late_without_catching_up() {
    let clock = MockClock::new(0);
    let bus = SlowBus { clock: &clock, per_read: Duration::from_millis(2) };
    let mut meter =
        Seismometer::new(SeismometerConfig::default(), bus, RecordingStore::default(), &clock).unwrap();

    meter.start().unwrap();
    meter.run_ticks(2 * TICKS_PER_SECOND).unwrap();

    let stats = *meter.stats();
    assert_eq!(stats.ticks, 400);
    assert_eq!(stats.late_ticks, 400);
    assert_eq!(clock.sleep_count(), 0);
    // every frame takes 6 ms and none is skipped
    assert_eq!(clock.now(), 400 * 6_000);
    // reports follow the counter, not the wall clock
    assert_eq!(stats.reports, 2);
}

#[test]
fn wrap_keeps_cadence_and_report_alignment() {
    let clock = MockClock::new(0);
    let config = SeismometerConfig::default().with_tick_guard(250);
    let mut meter =
        Seismometer::new(config, StillTable { raw: REST }, RecordingStore::default(), &clock).unwrap();

    meter.start().unwrap();
    meter.run_ticks(1000).unwrap();

    let stats = *meter.stats();
    assert_eq!(stats.wraps, 4);
    assert_eq!(meter.pacer().wraps(), 4);
    // frames 0 and 200 of the first cycle, frame 200 of the next three
    assert_eq!(stats.reports, 5);
    assert_eq!(clock.now(), 5_000_000);
    assert_eq!(stats.late_ticks, 0);
}

#[test]
fn sensor_failure_stops_the_loop() {
    let clock = MockClock::new(0);
    let mut meter = Seismometer::new(
        SeismometerConfig::default(),
        FailingBus { healthy_reads: 7 },
        RecordingStore::default(),
        &clock,
    )
    .unwrap();

    let err = meter.run().unwrap_err();
    match err {
        RunError::Sensor { axis, error } => {
            assert_eq!(axis, Axis::Y);
            assert_eq!(error, "spi transfer failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(meter.stats().ticks, 2);
}

#[test]
fn reset_failure_prevents_start() {
    let clock = MockClock::new(0);
    let store = RecordingStore { fail_reset: true, ..RecordingStore::default() };
    let mut meter =
        Seismometer::new(SeismometerConfig::default(), StillTable { raw: REST }, store, &clock).unwrap();

    let err = meter.run().unwrap_err();
    assert!(matches!(err, RunError::Reset("store is read-only")));
    assert_eq!(err.to_string(), "Resetting published intensity failed: store is read-only");
    assert_eq!(meter.stats().ticks, 0);
}

#[test]
fn publish_failures_are_counted_and_survived() {
    let clock = MockClock::new(0);
    let store = RecordingStore { fail_publish: true, ..RecordingStore::default() };
    let mut meter =
        Seismometer::new(SeismometerConfig::default(), ShakeTable::new(100, 200, 2000), store, &clock)
            .unwrap();

    meter.start().unwrap();
    meter.run_ticks(20 * TICKS_PER_SECOND).unwrap();

    let stats = *meter.stats();
    assert_eq!(stats.ticks, 4000);
    assert_eq!(stats.publishes, 0);
    assert_eq!(stats.publish_failures, 8);
    assert_eq!(meter.last_published(), None);
}

#[test]
fn stats_render_as_one_line() {
    let stats = RunStats { ticks: 10, reports: 1, ..RunStats::default() };
    assert_eq!(
        stats.to_string(),
        "ticks=10 late=0 reports=1 published=0 suppressed=0 failed=0 wraps=0"
    );
}
