// src/stage_inputs.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::data_analysis::stage_merge::stitch_segments;
use crate::data_input::telemetry_parser::parse_telemetry_file;
use crate::data_input::telemetry_row::{Column, FlightEvent, TelemetryLog, TelemetryRow};

/// The two positional input files, in the order given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct StageInputs {
    pub first_file: PathBuf,
    pub second_file: PathBuf,
}

impl StageInputs {
    /// Accepts exactly two positional arguments (program name excluded).
    pub fn from_args<I>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let first_file = PathBuf::from(args.next()?);
        let second_file = PathBuf::from(args.next()?);
        if args.next().is_some() {
            return None;
        }
        Some(Self {
            first_file,
            second_file,
        })
    }
}

pub fn usage(program: &str) -> String {
    format!("Usage: {program} <first_file.csv> <second_file.csv>")
}

/// Merged flight timeline plus the events announced by both exports.
pub struct StitchedFlight {
    pub rows: Vec<TelemetryRow>,
    pub events: Vec<FlightEvent>,
}

fn print_summary(path: &Path, log: &TelemetryLog) {
    match log.sample_rate() {
        Some(rate) => println!(
            "  '{}': {} rows, estimated sample rate {:.2} Hz",
            path.display(),
            log.rows.len(),
            rate
        ),
        None => println!("  '{}': {} rows", path.display(), log.rows.len()),
    }
}

fn print_events(path: &Path, events: &[FlightEvent]) {
    if events.is_empty() {
        return;
    }
    println!("Flight events in '{}':", path.display());
    for event in events {
        println!("  {:<20} t={:.3} s", event.name, event.time_sec);
    }
}

/// Reads both exports with `layout` and stitches them into one timeline.
pub fn load_stitched_flight(
    inputs: &StageInputs,
    layout: &[Column],
) -> Result<StitchedFlight, Box<dyn Error>> {
    println!("\nReading telemetry exports...");
    let first = parse_telemetry_file(&inputs.first_file, layout)?;
    print_summary(&inputs.first_file, &first);
    let second = parse_telemetry_file(&inputs.second_file, layout)?;
    print_summary(&inputs.second_file, &second);

    print_events(&inputs.first_file, &first.events);
    print_events(&inputs.second_file, &second.events);

    let rows = stitch_segments(&first.rows, &second.rows)?;
    println!("Loaded {} entries into the merged flight timeline.", rows.len());

    let mut events = first.events;
    events.extend(second.events);
    Ok(StitchedFlight { rows, events })
}


// src/stage_inputs.rs
