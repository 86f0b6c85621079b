// tests/stage_pipeline_test.rs

use std::io::Write;

use approx::assert_abs_diff_eq;
use stage_telemetry_render::constants::{BURNOUT_TIME_S, EXPORT_COLUMNS};
use stage_telemetry_render::data_analysis::apex_fit::{analyze_apex, ApexFitConfig};
use stage_telemetry_render::error::TelemetryError;
use stage_telemetry_render::stage_inputs::{load_stitched_flight, StageInputs};
use tempfile::NamedTempFile;

fn export_file(rows: &[(f64, f64, f64, f64)], events: &[(&str, f64)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    writeln!(file, "# Simulated flight export").unwrap();
    writeln!(file, "# Time (s),Altitude (m),Total acceleration (m/s²),Air pressure (mbar)").unwrap();
    for (name, t) in events {
        writeln!(file, "# Event {name} occurred at t={t} seconds").unwrap();
    }
    for (t, alt, acc, p) in rows {
        writeln!(file, "{t},{alt},{acc},{p}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn pressure(t: f64) -> f64 {
    2.0 * t * t - 3.0 * t + 5.0
}

fn flight_rows(start: f64, end: f64, step: f64) -> Vec<(f64, f64, f64, f64)> {
    let count = ((end - start) / step).round() as usize;
    (0..count)
        .map(|i| {
            let t = start + i as f64 * step;
            (t, 10.0 * t, 9.81, pressure(t))
        })
        .collect()
}

fn inputs(first: &NamedTempFile, second: &NamedTempFile) -> StageInputs {
    StageInputs {
        first_file: first.path().to_path_buf(),
        second_file: second.path().to_path_buf(),
    }
}

#[test]
fn test_first_file_starting_later_is_first_stage() {
    // First file starts at 10.0 s, second covers the flight from 0.0 s
    let first = export_file(&flight_rows(10.0, 15.0, 0.5), &[]);
    let second = export_file(&flight_rows(0.0, 20.0, 0.5), &[("LAUNCH", 0.0)]);

    let flight = load_stitched_flight(&inputs(&first, &second), EXPORT_COLUMNS).unwrap();
    let times: Vec<f64> = flight.rows.iter().map(|r| r.time_sec).collect();

    // 20 second-stage rows before 10.0 s, then all 10 first-stage rows
    assert_eq!(times.len(), 30);
    assert!(times[..20].iter().all(|&t| t < 10.0));
    assert_eq!(times[20], 10.0);
    assert_eq!(*times.last().unwrap(), 14.5);
    assert_eq!(flight.events.len(), 1);
}

#[test]
fn test_argument_order_does_not_matter() {
    let late = export_file(&flight_rows(4.0, 8.0, 0.1), &[]);
    let early = export_file(&flight_rows(0.0, 12.0, 0.1), &[]);

    let forward = load_stitched_flight(&inputs(&late, &early), EXPORT_COLUMNS).unwrap();
    let backward = load_stitched_flight(&inputs(&early, &late), EXPORT_COLUMNS).unwrap();
    assert_eq!(forward.rows, backward.rows);
    assert!(forward.rows.windows(2).all(|w| w[0].time_sec <= w[1].time_sec));
}

#[test]
fn test_apex_fit_over_stitched_exports() {
    let first = export_file(&flight_rows(4.0, 9.0, 0.05), &[("APOGEE", 6.0)]);
    let second = export_file(&flight_rows(0.0, 9.0, 0.05), &[("BURNOUT", BURNOUT_TIME_S)]);

    let flight = load_stitched_flight(&inputs(&first, &second), EXPORT_COLUMNS).unwrap();
    let report = analyze_apex(&flight.rows, &ApexFitConfig::default()).unwrap();
    let best = report.best.expect("a full window after burnout");

    assert_abs_diff_eq!(best.fit.a, 2.0, epsilon = 1e-6);
    assert_abs_diff_eq!(best.fit.b, -3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(best.fit.c, 5.0, epsilon = 1e-6);
    assert_abs_diff_eq!(best.fit.quality, 0.0, epsilon = 1e-10);
    assert!(best.window_start > BURNOUT_TIME_S);
    assert_eq!(best.curve.len(), 100);
}

#[test]
fn test_equal_start_times_are_reported() {
    let a = export_file(&flight_rows(0.0, 2.0, 0.5), &[]);
    let b = export_file(&flight_rows(0.0, 3.0, 0.5), &[]);

    let err = load_stitched_flight(&inputs(&a, &b), EXPORT_COLUMNS)
        .err()
        .expect("ambiguous stage order");
    assert!(matches!(
        err.downcast_ref::<TelemetryError>(),
        Some(TelemetryError::AmbiguousStageOrder(_))
    ));
}

#[test]
fn test_malformed_export_is_fatal() {
    let good = export_file(&flight_rows(0.0, 2.0, 0.5), &[]);
    let mut bad = NamedTempFile::new().unwrap();
    writeln!(bad, "1.0,10.0,9.81,not-a-number").unwrap();
    bad.flush().unwrap();

    let result = load_stitched_flight(&inputs(&bad, &good), EXPORT_COLUMNS);
    assert!(result.is_err());
}

#[test]
fn test_crate_version_defaults_to_package_version() {
    if option_env!("VERGEN_GIT_SEMVER").is_none() {
        assert_eq!(stage_telemetry_render::crate_version(), env!("CARGO_PKG_VERSION"));
    }
}

