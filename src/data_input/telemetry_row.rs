// src/data_input/telemetry_row.rs

/// Columns the flight simulation export can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Time,
    Altitude,
    TotalAcceleration,
    Pressure,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Time => "time",
            Column::Altitude => "altitude",
            Column::TotalAcceleration => "totalacc",
            Column::Pressure => "pressure",
        }
    }
}

/// Structure to hold data parsed from a single row of the telemetry export.
/// Fields other than time are `None` when the column layout does not include them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TelemetryRow {
    pub time_sec: f64,                   // Timestamp (in seconds).
    pub altitude: Option<f64>,           // Altitude (m).
    pub total_acceleration: Option<f64>, // Total acceleration (m/s^2).
    pub pressure: Option<f64>,           // Barometric pressure (mbar).
}

impl TelemetryRow {
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Time => Some(self.time_sec),
            Column::Altitude => self.altitude,
            Column::TotalAcceleration => self.total_acceleration,
            Column::Pressure => self.pressure,
        }
    }
}

/// A flight event announced in an export comment, e.g. `# Event BURNOUT occurred at t=2.242 seconds`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightEvent {
    pub name: String,
    pub time_sec: f64,
}

/// Contents of one export file: its rows in file order plus any events found in comments.
#[derive(Debug, Default, Clone)]
pub struct TelemetryLog {
    pub rows: Vec<TelemetryRow>,
    pub events: Vec<FlightEvent>,
}

impl TelemetryLog {
    /// Average sample rate over rows with strictly increasing timestamps.
    pub fn sample_rate(&self) -> Option<f64> {
        let mut total_delta = 0.0;
        let mut count = 0usize;
        for pair in self.rows.windows(2) {
            let delta = pair[1].time_sec - pair[0].time_sec;
            if delta > 1e-9 {
                total_delta += delta;
                count += 1;
            }
        }
        if count > 0 {
            Some(count as f64 / total_delta)
        } else {
            None
        }
    }
}

// src/data_input/telemetry_row.rs
