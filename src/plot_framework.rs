// src/plot_framework.rs

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt; // Import QuantileExt for .min() and .max() on array views
use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::constants::{
    FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE,
    FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH,
};

/// Rendering settings for one program invocation.
/// Built once in `main` and handed to every plot function.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: PLOT_WIDTH,
            height: PLOT_HEIGHT,
            output_dir: PathBuf::from("."),
        }
    }
}

impl RenderConfig {
    /// `<output_dir>/<root_name>_<plot_suffix>.png`
    pub fn output_path(&self, root_name: &str, plot_suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{root_name}_{plot_suffix}.png"))
    }
}

/// File stem used to name output images and title plots.
pub fn root_name_from_path(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Min and max of a set of values, `None` if empty or containing NaN.
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let view = ArrayView1::from(values);
    match (view.min(), view.max()) {
        (Ok(&min), Ok(&max)) => Some((min, max)),
        _ => None,
    }
}

/// Time range and padded value range covering every point of every series.
pub fn series_ranges(series: &[PlotSeries]) -> Option<(Range<f64>, Range<f64>)> {
    let times: Vec<f64> = series.iter().flat_map(|s| s.data.iter().map(|p| p.0)).collect();
    let values: Vec<f64> = series.iter().flat_map(|s| s.data.iter().map(|p| p.1)).collect();
    let (time_min, time_max) = value_bounds(&times)?;
    let (value_min, value_max) = value_bounds(&values)?;
    let (padded_min, padded_max) = calculate_range(value_min, value_max);
    Some((time_min..time_max, padded_min..padded_max))
}

/// Formats a Y-axis tick with precision matched to the visible span.
pub fn format_axis_value(value: f64, span: f64) -> String {
    let span = span.abs();
    if span < 10.0 {
        format!("{value:.2}")
    } else if span < 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.0}")
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel_name: &str,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{panel_name} {plot_type} Data Unavailable: {reason}");
    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(
        message,
        (width as i32 / 4, height as i32 / 2),
        text_style,
    ))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// A labelled point drawn on top of the series, e.g. an estimated apex.
#[derive(Clone)]
pub struct PlotMarker {
    pub point: (f64, f64),
    pub label: String,
    pub color: RGBColor,
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub markers: Vec<PlotMarker>,
}

impl PlotConfig {
    fn is_drawable(&self) -> Result<(), &'static str> {
        if !self.series.iter().any(|s| !s.data.is_empty()) {
            Err("No data points")
        } else if !(self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start) {
            Err("Invalid ranges")
        } else {
            Ok(())
        }
    }
}

/// Draws a single time-series chart using a PlotConfig struct.
fn draw_single_chart_with_config(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    let y_span = plot_config.y_range.end - plot_config.y_range.start;
    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&|y| format_axis_value(*y, y_span))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;

        if !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    s.color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }
    }

    for marker in &plot_config.markers {
        let (x, y) = marker.point;
        if !plot_config.x_range.contains(&x) || !plot_config.y_range.contains(&y) {
            continue;
        }
        let color = marker.color;
        chart
            .draw_series(std::iter::once(Circle::new((x, y), 6, color.filled())))?
            .label(&marker.label)
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
        legend_series_count += 1;
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    Ok(())
}

fn titled_root<'a>(
    output_path: &'a Path,
    root_name: &str,
    config: &RenderConfig,
) -> Result<DrawingArea<BitMapBackend<'a>, Shift>, Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name.to_string(),
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE)
            .into_font()
            .color(&BLACK),
    ))?;
    Ok(root_area)
}

/// Creates a stacked plot image with one subplot per panel name.
///
/// `get_panel_plot_data` is called with each panel index; `None` draws a placeholder.
pub fn draw_stacked_plot<F>(
    output_path: &Path,
    root_name: &str,
    plot_type_name: &str,
    panel_names: &[&str],
    config: &RenderConfig,
    mut get_panel_plot_data: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Option<PlotConfig>,
{
    let root_area = titled_root(output_path, root_name, config)?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((panel_names.len().max(1), 1));
    let mut any_panel_plotted = false;

    for (panel_index, panel_name) in panel_names.iter().enumerate() {
        let area = &sub_plot_areas[panel_index];
        match get_panel_plot_data(panel_index) {
            Some(plot_config) => match plot_config.is_drawable() {
                Ok(()) => {
                    draw_single_chart_with_config(area, &plot_config)?;
                    any_panel_plotted = true;
                }
                Err(reason) => draw_unavailable_message(area, panel_name, plot_type_name, reason)?,
            },
            None => {
                let reason = "Column not present in export layout";
                draw_unavailable_message(area, panel_name, plot_type_name, reason)?;
            }
        }
    }

    root_area.present()?;
    if any_panel_plotted {
        println!("  Stacked plot saved as '{}'.", output_path.display());
    } else {
        println!(
            "  Plot '{}' written with placeholder messages only: no panel had data.",
            output_path.display()
        );
    }
    Ok(())
}

/// Creates a plot image holding a single chart.
pub fn draw_single_plot(
    output_path: &Path,
    root_name: &str,
    plot_type_name: &str,
    config: &RenderConfig,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let root_area = titled_root(output_path, root_name, config)?;
    let area = root_area.margin(50, 5, 5, 5);
    match plot_config.is_drawable() {
        Ok(()) => {
            draw_single_chart_with_config(&area, plot_config)?;
            root_area.present()?;
            println!("  Plot saved as '{}'.", output_path.display());
        }
        Err(reason) => {
            draw_unavailable_message(&area, &plot_config.title, plot_type_name, reason)?;
            root_area.present()?;
            println!(
                "  Plot '{}' written with a placeholder message: {reason}.",
                output_path.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_pads() {
        let (lo, hi) = calculate_range(0.0, 10.0);
        assert!((lo + 1.5).abs() < 1e-12);
        assert!((hi - 11.5).abs() < 1e-12);

        // Flat data gets a fixed pad
        assert_eq!(calculate_range(5.0, 5.0), (4.5, 5.5));
        // Swapped bounds are normalised
        assert_eq!(calculate_range(10.0, 0.0), calculate_range(0.0, 10.0));
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(&[3.0, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(value_bounds(&[]), None);
        assert_eq!(value_bounds(&[1.0, f64::NAN]), None);
    }

    #[test]
    fn test_series_ranges_cover_all_series() {
        let series = vec![
            PlotSeries {
                data: vec![(0.0, 1000.0), (1.0, 990.0)],
                label: "a".to_string(),
                color: RED,
                stroke_width: 1,
            },
            PlotSeries {
                data: vec![(0.5, 980.0), (3.0, 995.0)],
                label: "b".to_string(),
                color: BLACK,
                stroke_width: 1,
            },
        ];
        let (x_range, y_range) = series_ranges(&series).unwrap();
        assert_eq!(x_range, 0.0..3.0);
        assert!(y_range.start < 980.0 && y_range.end > 1000.0);
    }

    #[test]
    fn test_output_path() {
        let config = RenderConfig {
            output_dir: PathBuf::from("out"),
            ..RenderConfig::default()
        };
        assert_eq!(
            config.output_path("flight", "apex_fit"),
            PathBuf::from("out").join("flight_apex_fit.png")
        );
        assert_eq!(root_name_from_path(Path::new("/data/stage1.csv")), "stage1");
    }
}

// src/plot_framework.rs
