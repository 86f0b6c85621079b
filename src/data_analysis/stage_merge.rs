// src/data_analysis/stage_merge.rs

use log::{info, warn};

use crate::data_input::telemetry_row::TelemetryRow;
use crate::error::{SegmentSlot, TelemetryError};

/// The two input segments after stage detection.
#[derive(Debug, Clone, Copy)]
pub struct StageOrder<'a> {
    /// Export written after separation; starts later and only covers the rest of the flight.
    pub first_stage: &'a [TelemetryRow],
    /// Export that covers the flight from launch.
    pub second_stage: &'a [TelemetryRow],
    /// Which input argument turned out to be the first stage.
    pub first_stage_slot: SegmentSlot,
}

fn validate_segment(rows: &[TelemetryRow], slot: SegmentSlot) -> Result<f64, TelemetryError> {
    let first = rows.first().ok_or(TelemetryError::EmptySegment(slot))?;
    for (index, pair) in rows.windows(2).enumerate() {
        if pair[1].time_sec < pair[0].time_sec {
            return Err(TelemetryError::UnsortedSegment {
                segment: slot,
                index: index + 1,
                previous: pair[0].time_sec,
                time: pair[1].time_sec,
            });
        }
    }
    Ok(first.time_sec)
}

/// Decides which segment is the first stage: the one whose first timestamp is later.
///
/// Both segments must be non-empty and sorted ascending by time, and their start
/// times must differ. Equal start times are rejected instead of guessing.
pub fn order_stages<'a>(
    a: &'a [TelemetryRow],
    b: &'a [TelemetryRow],
) -> Result<StageOrder<'a>, TelemetryError> {
    let start_a = validate_segment(a, SegmentSlot::First)?;
    let start_b = validate_segment(b, SegmentSlot::Second)?;

    let order = if start_a > start_b {
        StageOrder {
            first_stage: a,
            second_stage: b,
            first_stage_slot: SegmentSlot::First,
        }
    } else if start_b > start_a {
        StageOrder {
            first_stage: b,
            second_stage: a,
            first_stage_slot: SegmentSlot::Second,
        }
    } else {
        return Err(TelemetryError::AmbiguousStageOrder(start_a));
    };

    if order.first_stage.len() > order.second_stage.len() {
        warn!(
            "first stage ({}) holds more rows than second stage ({}); exports may be mislabeled",
            order.first_stage.len(),
            order.second_stage.len()
        );
    }
    Ok(order)
}

/// Second-stage rows strictly before the first stage's start, followed by the whole first stage.
pub fn merge_stages(first_stage: &[TelemetryRow], second_stage: &[TelemetryRow]) -> Vec<TelemetryRow> {
    let cutoff_time = match first_stage.first() {
        Some(row) => row.time_sec,
        None => return second_stage.to_vec(),
    };

    let mut merged: Vec<TelemetryRow> = second_stage
        .iter()
        .filter(|row| row.time_sec < cutoff_time)
        .cloned()
        .collect();
    merged.extend_from_slice(first_stage);
    merged
}

/// Orders the two segments and stitches them into one continuous flight timeline.
/// The result does not depend on argument order.
pub fn stitch_segments(
    a: &[TelemetryRow],
    b: &[TelemetryRow],
) -> Result<Vec<TelemetryRow>, TelemetryError> {
    let order = order_stages(a, b)?;
    let merged = merge_stages(order.first_stage, order.second_stage);
    info!(
        "{} is the first stage (starts at t={} s); merged series has {} rows",
        order.first_stage_slot,
        order.first_stage[0].time_sec,
        merged.len()
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(times: &[f64]) -> Vec<TelemetryRow> {
        times
            .iter()
            .map(|&t| TelemetryRow {
                time_sec: t,
                altitude: Some(t * 10.0),
                total_acceleration: Some(9.81),
                pressure: Some(1013.25 - t),
            })
            .collect()
    }

    fn times(rows: &[TelemetryRow]) -> Vec<f64> {
        rows.iter().map(|r| r.time_sec).collect()
    }

    #[test]
    fn test_later_start_is_first_stage() {
        let first_file = segment(&[10.0, 10.5, 11.0]);
        let second_file = segment(&[0.0, 5.0, 9.5, 10.0, 12.0]);

        let order = order_stages(&first_file, &second_file).unwrap();
        assert_eq!(order.first_stage_slot, SegmentSlot::First);

        let merged = stitch_segments(&first_file, &second_file).unwrap();
        assert_eq!(times(&merged), vec![0.0, 5.0, 9.5, 10.0, 10.5, 11.0]);
    }

    #[test]
    fn test_swapped_arguments_give_identical_series() {
        let early = segment(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let late = segment(&[2.5, 3.5, 4.5]);

        let forward = stitch_segments(&late, &early).unwrap();
        let backward = stitch_segments(&early, &late).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(
            order_stages(&early, &late).unwrap().first_stage_slot,
            SegmentSlot::Second
        );
    }

    #[test]
    fn test_disjoint_segments_keep_all_rows() {
        let second = segment(&[0.0, 1.0, 2.0]);
        let first = segment(&[3.0, 4.0]);
        let merged = stitch_segments(&first, &second).unwrap();
        assert_eq!(merged.len(), first.len() + second.len());
    }

    #[test]
    fn test_merged_series_is_monotonic() {
        let second = segment(&[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let first = segment(&[0.35, 0.45, 0.55, 0.65]);
        let merged = stitch_segments(&first, &second).unwrap();
        assert!(merged.windows(2).all(|w| w[0].time_sec <= w[1].time_sec));
        assert_eq!(times(&merged), vec![0.0, 0.1, 0.2, 0.3, 0.35, 0.45, 0.55, 0.65]);
    }

    #[test]
    fn test_rows_at_first_stage_start_are_dropped() {
        let second = segment(&[0.0, 1.0, 2.0, 3.0]);
        let first = segment(&[2.0, 2.5]);
        let merged = merge_stages(&first, &second);
        assert_eq!(times(&merged), vec![0.0, 1.0, 2.0, 2.5]);
        // The 2.0 row comes from the first stage segment
        assert_eq!(merged[2], first[0]);
    }

    #[test]
    fn test_equal_start_times_rejected() {
        let a = segment(&[1.0, 2.0]);
        let b = segment(&[1.0, 3.0]);
        assert!(matches!(
            order_stages(&a, &b),
            Err(TelemetryError::AmbiguousStageOrder(t)) if t == 1.0
        ));
    }

    #[test]
    fn test_unsorted_segment_rejected() {
        let a = segment(&[5.0, 4.0, 6.0]);
        let b = segment(&[0.0, 1.0]);
        match order_stages(&a, &b) {
            Err(TelemetryError::UnsortedSegment { segment, index, .. }) => {
                assert_eq!(segment, SegmentSlot::First);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_segment_rejected() {
        let a = segment(&[]);
        let b = segment(&[0.0]);
        assert!(matches!(
            order_stages(&a, &b),
            Err(TelemetryError::EmptySegment(SegmentSlot::First))
        ));
    }
}

// src/data_analysis/stage_merge.rs
