// src/data_analysis/parabola_fit.rs

use nalgebra::{Matrix3, Vector3};

use crate::constants::MIN_FIT_SAMPLES;
use crate::error::FitError;

/// Unweighted least-squares fit of `value ≈ a·t² + b·t + c`.
#[derive(Debug, Clone)]
pub struct ParabolaFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Parameter covariance estimate, ordered (a, b, c).
    pub covariance: Matrix3<f64>,
    /// Sum of squared parameter standard errors. Lower is a tighter fit.
    pub quality: f64,
    pub residual_sum_squares: f64,
    pub sample_count: usize,
}

impl ParabolaFit {
    pub fn evaluate(&self, t: f64) -> f64 {
        (self.a * t + self.b) * t + self.c
    }

    pub fn standard_errors(&self) -> [f64; 3] {
        let diagonal = self.covariance.diagonal();
        [
            diagonal[0].max(0.0).sqrt(),
            diagonal[1].max(0.0).sqrt(),
            diagonal[2].max(0.0).sqrt(),
        ]
    }

    /// Turning point `(t, value)` of the parabola, `None` for a degenerate (linear) fit.
    pub fn vertex(&self) -> Option<(f64, f64)> {
        if self.a.abs() < f64::EPSILON {
            return None;
        }
        let t = -self.b / (2.0 * self.a);
        Some((t, self.evaluate(t)))
    }

    /// `count` evenly spaced points over `[start, end]`, both ends included.
    pub fn sample(&self, start: f64, end: f64, count: usize) -> Vec<(f64, f64)> {
        linspace(start, end, count)
            .into_iter()
            .map(|t| (t, self.evaluate(t)))
            .collect()
    }
}

pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Fits a quadratic to `(times, values)` and estimates parameter covariance as
/// `s²·(XᵀX)⁻¹` with `s² = RSS / (n − 3)`.
///
/// The normal equations are solved on times centred at their mean, then the
/// coefficients and covariance are mapped back to raw time.
pub fn fit_parabola(times: &[f64], values: &[f64]) -> Result<ParabolaFit, FitError> {
    if times.len() != values.len() {
        return Err(FitError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }
    let n = times.len();
    if n < MIN_FIT_SAMPLES {
        return Err(FitError::TooFewSamples {
            required: MIN_FIT_SAMPLES,
            got: n,
        });
    }
    if times.iter().chain(values.iter()).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }

    let t0 = times.iter().sum::<f64>() / n as f64;
    let basis = |t: f64| {
        let u = t - t0;
        Vector3::new(u * u, u, 1.0)
    };

    // XᵀX and Xᵀy accumulated row by row
    let mut normal = Matrix3::<f64>::zeros();
    let mut moment = Vector3::<f64>::zeros();
    for (&t, &value) in times.iter().zip(values) {
        let x = basis(t);
        normal += x * x.transpose();
        moment += x * value;
    }

    let normal_inverse = normal
        .try_inverse()
        .filter(|inverse| inverse.iter().all(|v| v.is_finite()))
        .ok_or(FitError::Singular)?;
    let centred = normal_inverse * moment;

    let residual_sum_squares: f64 = times
        .iter()
        .zip(values)
        .map(|(&t, &value)| {
            let residual = value - basis(t).dot(&centred);
            residual * residual
        })
        .sum();
    let variance = residual_sum_squares / (n - 3) as f64;

    // Centred (α, β, γ) -> raw (a, b, c)
    let transform = Matrix3::new(
        1.0, 0.0, 0.0,
        -2.0 * t0, 1.0, 0.0,
        t0 * t0, -t0, 1.0,
    );
    let coefficients = transform * centred;
    let covariance = transform * (normal_inverse * variance) * transform.transpose();
    let quality = covariance.trace();

    Ok(ParabolaFit {
        a: coefficients[0],
        b: coefficients[1],
        c: coefficients[2],
        covariance,
        quality,
        residual_sum_squares,
        sample_count: n,
    })
}


// src/data_analysis/parabola_fit.rs
