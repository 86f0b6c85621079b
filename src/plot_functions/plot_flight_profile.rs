// src/plot_functions/plot_flight_profile.rs

use std::error::Error;

use crate::constants::{COLOR_ALTITUDE, COLOR_PRESSURE, COLOR_TOTAL_ACCELERATION, LINE_WIDTH_PLOT};
use crate::data_input::telemetry_row::{Column, TelemetryRow};
use crate::plot_framework::{draw_stacked_plot, series_ranges, PlotConfig, PlotSeries, RenderConfig};

/// Panels of the flight profile plot, top to bottom.
const PROFILE_PANELS: [(Column, &str, &str); 3] = [
    (Column::TotalAcceleration, "Total Acceleration", "Acceleration (m/s²)"),
    (Column::Pressure, "Pressure", "Pressure (mbar)"),
    (Column::Altitude, "Altitude", "Altitude (m)"),
];

/// Collects `(time, value)` points of one column, skipping rows without a finite value.
pub fn column_series(rows: &[TelemetryRow], column: Column) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|row| row.value(column).filter(|v| v.is_finite()).map(|v| (row.time_sec, v)))
        .collect()
}

/// Generates the stacked Total Acceleration / Pressure / Altitude vs time plot.
pub fn plot_flight_profile(
    merged: &[TelemetryRow],
    root_name: &str,
    config: &RenderConfig,
) -> Result<(), Box<dyn Error>> {
    let output_path = config.output_path(root_name, "flight_profile");
    let plot_type_name = "Flight Profile";
    let panel_names: Vec<&str> = PROFILE_PANELS.iter().map(|(_, name, _)| *name).collect();
    let colors = [*COLOR_TOTAL_ACCELERATION, *COLOR_PRESSURE, *COLOR_ALTITUDE];

    draw_stacked_plot(
        &output_path,
        root_name,
        plot_type_name,
        &panel_names,
        config,
        |panel_index| {
            let (column, name, y_label) = PROFILE_PANELS[panel_index];
            let data = column_series(merged, column);
            if data.is_empty() {
                return None;
            }

            let series = vec![PlotSeries {
                data,
                label: name.to_string(),
                color: colors[panel_index],
                stroke_width: LINE_WIDTH_PLOT,
            }];
            let (x_range, y_range) = series_ranges(&series)?;

            Some(PlotConfig {
                title: format!("{name} vs Time"),
                x_range,
                y_range,
                series,
                x_label: "Time (s)".to_string(),
                y_label: y_label.to_string(),
                markers: vec![],
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_series_skips_missing_values() {
        let rows = vec![
            TelemetryRow {
                time_sec: 0.0,
                altitude: None,
                total_acceleration: Some(9.81),
                pressure: Some(1013.0),
            },
            TelemetryRow {
                time_sec: 0.1,
                altitude: None,
                total_acceleration: Some(50.0),
                pressure: Some(1012.5),
            },
            TelemetryRow {
                time_sec: 0.2,
                altitude: None,
                total_acceleration: Some(49.0),
                pressure: Some(f64::NAN),
            },
        ];
        assert!(column_series(&rows, Column::Altitude).is_empty());
        assert_eq!(
            column_series(&rows, Column::Pressure),
            vec![(0.0, 1013.0), (0.1, 1012.5)]
        );
        assert_eq!(column_series(&rows, Column::TotalAcceleration).len(), 3);
    }
}

// src/plot_functions/plot_flight_profile.rs
