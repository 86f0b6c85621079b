// src/data_analysis/apex_fit.rs

use log::{debug, info, warn};

use crate::constants::{
    BURNOUT_TIME_S, FIT_WINDOW_CAPACITY, MIN_FIT_SAMPLES, PARABOLA_HORIZON_S,
    PARABOLA_SAMPLE_COUNT,
};
use crate::data_analysis::fit_window::FitWindow;
use crate::data_analysis::parabola_fit::{fit_parabola, ParabolaFit};
use crate::data_input::telemetry_row::TelemetryRow;
use crate::error::TelemetryError;

/// Parameters of the sliding-window apex search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApexFitConfig {
    /// Rows at or before this time never enter the fit window.
    pub burnout_time_s: f64,
    pub window_capacity: usize,
    /// Length of the dense parabola sample, starting at the best window's oldest sample.
    pub horizon_s: f64,
    pub parabola_samples: usize,
}

impl Default for ApexFitConfig {
    fn default() -> Self {
        Self {
            burnout_time_s: BURNOUT_TIME_S,
            window_capacity: FIT_WINDOW_CAPACITY,
            horizon_s: PARABOLA_HORIZON_S,
            parabola_samples: PARABOLA_SAMPLE_COUNT,
        }
    }
}

/// The lowest-quality-score window seen during a scan.
#[derive(Debug, Clone)]
pub struct BestFit {
    pub fit: ParabolaFit,
    pub window_start: f64,
    pub window_end: f64,
    /// Dense sample of the fitted parabola over `[window_start, window_start + horizon]`.
    pub curve: Vec<(f64, f64)>,
}

impl BestFit {
    /// Estimated apex `(time, pressure)` from the parabola's vertex.
    pub fn apex(&self) -> Option<(f64, f64)> {
        self.fit.vertex()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApexFitReport {
    pub best: Option<BestFit>,
    pub windows_fitted: usize,
    pub windows_skipped: usize,
    /// Rows after burnout that were pushed into the window.
    pub rows_considered: usize,
    pub rows_before_burnout: usize,
}

/// Single-pass sliding-window parabola fit over pressure readings.
pub struct ApexFitAnalyzer {
    config: ApexFitConfig,
    window: FitWindow,
    report: ApexFitReport,
}

impl ApexFitAnalyzer {
    /// Fails when the window could never hold enough samples for a quadratic fit.
    pub fn new(config: ApexFitConfig) -> Result<Self, TelemetryError> {
        if config.window_capacity < MIN_FIT_SAMPLES {
            return Err(TelemetryError::InvalidWindowCapacity {
                capacity: config.window_capacity,
                minimum: MIN_FIT_SAMPLES,
            });
        }
        Ok(Self {
            window: FitWindow::with_capacity(config.window_capacity),
            config,
            report: ApexFitReport::default(),
        })
    }

    pub fn window(&self) -> &FitWindow {
        &self.window
    }

    /// Feeds one row. Returns the quality score when a fit was run for this row.
    pub fn feed(&mut self, row: &TelemetryRow) -> Result<Option<f64>, TelemetryError> {
        if row.time_sec <= self.config.burnout_time_s {
            self.report.rows_before_burnout += 1;
            return Ok(None);
        }
        let pressure = row
            .pressure
            .ok_or(TelemetryError::MissingPressure { time: row.time_sec })?;

        self.window.push(row.time_sec, pressure);
        self.report.rows_considered += 1;
        if !self.window.is_full() {
            return Ok(None);
        }

        let (times, pressures) = self.window.columns();
        let fit = match fit_parabola(&times, &pressures) {
            Ok(fit) if fit.quality.is_finite() => fit,
            Ok(_) => {
                warn!("Skipping window ending at t={} s: non-finite quality score", row.time_sec);
                self.report.windows_skipped += 1;
                return Ok(None);
            }
            Err(e) => {
                warn!("Skipping window ending at t={} s: {}", row.time_sec, e);
                self.report.windows_skipped += 1;
                return Ok(None);
            }
        };
        self.report.windows_fitted += 1;
        let quality = fit.quality;

        let improved = match &self.report.best {
            None => true,
            Some(best) => quality < best.fit.quality,
        };
        if improved {
            let window_start = times[0];
            let window_end = times[times.len() - 1];
            debug!(
                "New best fit for window [{window_start}, {window_end}]: quality {quality:e}"
            );
            let curve = fit.sample(
                window_start,
                window_start + self.config.horizon_s,
                self.config.parabola_samples,
            );
            self.report.best = Some(BestFit {
                fit,
                window_start,
                window_end,
                curve,
            });
        }
        Ok(Some(quality))
    }

    pub fn finish(self) -> ApexFitReport {
        self.report
    }
}

/// Scans the merged series once, fitting every full window after burnout and keeping
/// the fit with the lowest quality score.
pub fn analyze_apex<'a, I>(rows: I, config: &ApexFitConfig) -> Result<ApexFitReport, TelemetryError>
where
    I: IntoIterator<Item = &'a TelemetryRow>,
{
    let mut analyzer = ApexFitAnalyzer::new(*config)?;
    for row in rows {
        analyzer.feed(row)?;
    }
    let report = analyzer.finish();

    match &report.best {
        Some(best) => info!(
            "Best fit over [{:.3}, {:.3}] s: p = {:.6}·t² + {:.6}·t + {:.6} (quality {:e}, {} windows)",
            best.window_start,
            best.window_end,
            best.fit.a,
            best.fit.b,
            best.fit.c,
            best.fit.quality,
            report.windows_fitted
        ),
        None => warn!(
            "No window filled after burnout at t={} s ({} rows considered)",
            config.burnout_time_s, report.rows_considered
        ),
    }
    Ok(report)
}


// src/data_analysis/apex_fit.rs
