// src/plot_functions/plot_apex_fit.rs

use std::error::Error;

use crate::constants::{
    COLOR_APEX_MARKER, COLOR_APEX_PARABOLA, COLOR_PRESSURE, LINE_WIDTH_FIT, LINE_WIDTH_PLOT,
};
use crate::data_analysis::apex_fit::ApexFitReport;
use crate::data_input::telemetry_row::{Column, TelemetryRow};
use crate::plot_framework::{
    draw_single_plot, series_ranges, PlotConfig, PlotMarker, PlotSeries, RenderConfig,
};
use crate::plot_functions::plot_flight_profile::column_series;

/// Builds the pressure chart with the best-fit parabola and apex marker overlaid.
pub fn apex_fit_plot_config(merged: &[TelemetryRow], report: &ApexFitReport) -> PlotConfig {
    let mut series = vec![PlotSeries {
        data: column_series(merged, Column::Pressure),
        label: "Pressure".to_string(),
        color: *COLOR_PRESSURE,
        stroke_width: LINE_WIDTH_PLOT,
    }];
    let mut markers = Vec::new();

    if let Some(best) = &report.best {
        series.push(PlotSeries {
            data: best.curve.clone(),
            label: format!(
                "Best fit {:.4}·t² {:+.4}·t {:+.2} (window {:.2}-{:.2} s)",
                best.fit.a, best.fit.b, best.fit.c, best.window_start, best.window_end
            ),
            color: *COLOR_APEX_PARABOLA,
            stroke_width: LINE_WIDTH_FIT,
        });
        if let Some((apex_time, apex_pressure)) = best.apex() {
            markers.push(PlotMarker {
                point: (apex_time, apex_pressure),
                label: format!("Apex t={apex_time:.2} s, p={apex_pressure:.2}"),
                color: *COLOR_APEX_MARKER,
            });
        }
    }

    // Only the measured pressure defines the axes so a steep parabola tail stays clipped
    let (x_range, y_range) = series_ranges(&series[..1]).unwrap_or((0.0..0.0, 0.0..0.0));

    PlotConfig {
        title: "Pressure vs Time with Apex Parabola Fit".to_string(),
        x_range,
        y_range,
        series,
        x_label: "Time (s)".to_string(),
        y_label: "Pressure (mbar)".to_string(),
        markers,
    }
}

/// Generates the pressure plot overlaid with the best-fit apex parabola.
pub fn plot_apex_fit(
    merged: &[TelemetryRow],
    report: &ApexFitReport,
    root_name: &str,
    config: &RenderConfig,
) -> Result<(), Box<dyn Error>> {
    let output_path = config.output_path(root_name, "apex_fit");
    let plot_config = apex_fit_plot_config(merged, report);
    draw_single_plot(&output_path, root_name, "Apex Fit", config, &plot_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::apex_fit::{analyze_apex, ApexFitConfig};

    #[test]
    fn test_overlay_contains_fit_and_marker() {
        let merged: Vec<TelemetryRow> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.05;
                TelemetryRow {
                    time_sec: t,
                    altitude: None,
                    total_acceleration: None,
                    pressure: Some(0.5 * t * t - 5.0 * t + 1000.0),
                }
            })
            .collect();
        let report = analyze_apex(&merged, &ApexFitConfig::default()).unwrap();
        let plot = apex_fit_plot_config(&merged, &report);

        assert_eq!(plot.series.len(), 2);
        assert_eq!(plot.series[0].data.len(), merged.len());
        assert_eq!(plot.series[1].data.len(), 100);
        assert_eq!(plot.markers.len(), 1);
        assert!((plot.markers[0].point.0 - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_without_fit_only_pressure_is_drawn() {
        let merged = vec![TelemetryRow {
            time_sec: 0.0,
            altitude: None,
            total_acceleration: None,
            pressure: Some(1013.0),
        }];
        let plot = apex_fit_plot_config(&merged, &ApexFitReport::default());
        assert_eq!(plot.series.len(), 1);
        assert!(plot.markers.is_empty());
    }
}

// src/plot_functions/plot_apex_fit.rs
