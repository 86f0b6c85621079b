// src/data_input/telemetry_parser.rs

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::constants::COMMENT_PREFIX;
use crate::data_input::telemetry_row::{Column, FlightEvent, TelemetryLog, TelemetryRow};
use crate::error::TelemetryError;

/// Extracts a flight event from a comment line such as
/// `# Event APOGEE occurred at t=14.73 seconds`.
pub fn parse_event_comment(line: &str) -> Option<FlightEvent> {
    let body = line.trim_start().strip_prefix(COMMENT_PREFIX)?.trim();
    let rest = body.strip_prefix("Event ")?;
    let (name, time_part) = rest.split_once(" occurred at t=")?;
    let time_str = time_part.trim().trim_end_matches("seconds").trim();
    let time_sec = time_str.parse::<f64>().ok()?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(FlightEvent {
        name: name.to_string(),
        time_sec,
    })
}

fn parse_column(
    record: &StringRecord,
    index: usize,
    column: Column,
    path: &Path,
    line: usize,
) -> Result<f64, TelemetryError> {
    let raw = record.get(index).unwrap_or("");
    // Measurement cells may read NaN; the time axis may not
    raw.parse::<f64>()
        .ok()
        .filter(|v| column != Column::Time || v.is_finite())
        .ok_or_else(|| TelemetryError::MalformedRow {
            path: path.to_path_buf(),
            line,
            column: column.name(),
            value: raw.to_string(),
        })
}

fn parse_record(
    record: &StringRecord,
    layout: &[Column],
    path: &Path,
    line: usize,
) -> Result<TelemetryRow, TelemetryError> {
    if record.len() < layout.len() {
        return Err(TelemetryError::ShortRow {
            path: path.to_path_buf(),
            line,
            expected: layout.len(),
            found: record.len(),
        });
    }

    let mut row = TelemetryRow::default();
    for (index, &column) in layout.iter().enumerate() {
        let value = parse_column(record, index, column, path, line)?;
        match column {
            Column::Time => row.time_sec = value,
            Column::Altitude => row.altitude = Some(value),
            Column::TotalAcceleration => row.total_acceleration = Some(value),
            Column::Pressure => row.pressure = Some(value),
        }
    }
    Ok(row)
}

/// Parses one header-less telemetry export using a fixed column layout.
///
/// Lines starting with `#` are comments; those announcing flight events are
/// collected into [`TelemetryLog::events`]. Blank lines are skipped. Any row
/// that does not match the layout aborts parsing with the offending line number.
pub fn parse_telemetry_file(
    input_file_path: &Path,
    layout: &[Column],
) -> Result<TelemetryLog, Box<dyn Error>> {
    if !layout.contains(&Column::Time) {
        return Err("Column layout must contain a time column".into());
    }

    let mut events: Vec<FlightEvent> = Vec::new();
    let mut csv_lines: Vec<String> = Vec::new();
    let mut csv_line_numbers: Vec<usize> = Vec::new();

    // First pass: split comments from data lines, remembering source line numbers
    {
        let file = File::open(input_file_path)
            .map_err(|e| format!("{}: {}", input_file_path.display(), e))?;
        let reader = BufReader::new(file);

        for (line_index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let trimmed_line = line.trim();

            if trimmed_line.is_empty() {
                continue;
            }

            if trimmed_line.starts_with(COMMENT_PREFIX) {
                if let Some(event) = parse_event_comment(trimmed_line) {
                    debug!("{}: event {} at t={} s", input_file_path.display(), event.name, event.time_sec);
                    events.push(event);
                }
                continue;
            }

            csv_lines.push(line);
            csv_line_numbers.push(line_index + 1);
        }
    }

    let csv_content = csv_lines.join("\n");
    let mut rows: Vec<TelemetryRow> = Vec::with_capacity(csv_lines.len());
    {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_content.as_bytes());

        for (record_index, result) in reader.records().enumerate() {
            let record = result?;
            let line = csv_line_numbers
                .get(record_index)
                .copied()
                .unwrap_or(record_index + 1);
            rows.push(parse_record(&record, layout, input_file_path, line)?);
        }
    }

    info!(
        "{}: read {} rows, {} flight events",
        input_file_path.display(),
        rows.len(),
        events.len()
    );

    Ok(TelemetryLog { rows, events })
}


// src/data_input/telemetry_parser.rs
