// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, GREEN, ORANGE, PURPLE, RED};
use plotters::style::RGBColor;

use crate::data_input::telemetry_row::Column;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Column layout of the flight simulation export. The files carry no header row,
// so this order is authoritative and never inferred from the data.
pub const EXPORT_COLUMNS: &[Column] = &[
    Column::Time,
    Column::Altitude,
    Column::TotalAcceleration,
    Column::Pressure,
];

// Reduced layout written by the bench simulator export (no altitude column).
pub const SIMULATOR_EXPORT_COLUMNS: &[Column] = &[
    Column::Time,
    Column::TotalAcceleration,
    Column::Pressure,
];

// Comment prefix used by the exporter for metadata and flight events.
pub const COMMENT_PREFIX: char = '#';

// --- Apex Fit Constants ---
pub const BURNOUT_TIME_S: f64 = 2.242; // Apex search starts strictly after this instant
pub const FIT_WINDOW_CAPACITY: usize = 30; // Trailing (time, pressure) samples per fit
pub const PARABOLA_HORIZON_S: f64 = 5.0; // Dense parabola spans [window start, window start + horizon]
pub const PARABOLA_SAMPLE_COUNT: usize = 100;

// Minimum number of points for a quadratic fit with a usable covariance (n - 3 > 0).
pub const MIN_FIT_SAMPLES: usize = 4;

// --- Plot Color Assignments ---
pub const COLOR_TOTAL_ACCELERATION: &RGBColor = &RED;
pub const COLOR_PRESSURE: &RGBColor = &BLUE;
pub const COLOR_ALTITUDE: &RGBColor = &GREEN;
pub const COLOR_APEX_PARABOLA: &RGBColor = &ORANGE;
pub const COLOR_APEX_MARKER: &RGBColor = &PURPLE;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_FIT: u32 = 3;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 18;

// src/constants.rs
