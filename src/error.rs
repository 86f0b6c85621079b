// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Which of the two input segments a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSlot {
    First,
    Second,
}

impl std::fmt::Display for SegmentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentSlot::First => write!(f, "first input"),
            SegmentSlot::Second => write!(f, "second input"),
        }
    }
}

/// Validation and analysis failures with enough context to point at the offending input.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("{path}: line {line}: column '{column}' has unparseable value '{value}'")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("{path}: line {line}: expected {expected} columns, found {found}")]
    ShortRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{0} contains no telemetry rows")]
    EmptySegment(SegmentSlot),

    #[error(
        "{segment} is not sorted by time: row {index} at t={time} s follows t={previous} s"
    )]
    UnsortedSegment {
        segment: SegmentSlot,
        index: usize,
        previous: f64,
        time: f64,
    },

    #[error(
        "cannot tell first stage from second stage: both inputs start at t={0} s"
    )]
    AmbiguousStageOrder(f64),

    #[error("row at t={time} s has no pressure value, check the column layout")]
    MissingPressure { time: f64 },

    #[error("fit window must hold at least {minimum} samples, configured for {capacity}")]
    InvalidWindowCapacity { capacity: usize, minimum: usize },
}

/// Reasons a single least-squares quadratic fit cannot be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("need at least {required} samples, got {got}")]
    TooFewSamples { required: usize, got: usize },

    #[error("time and value slices differ in length ({times} vs {values})")]
    LengthMismatch { times: usize, values: usize },

    #[error("input contains non-finite values")]
    NonFinite,

    #[error("normal matrix is singular")]
    Singular,
}

// src/error.rs
