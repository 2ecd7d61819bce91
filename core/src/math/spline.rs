//! Natural cubic splines.
//!
//! A natural spline has zero second derivative at both end knots, so it
//! reproduces straight lines exactly and never overshoots past the last
//! sample. Evaluation outside the knot range returns NaN instead of
//! extrapolating.

use crate::math::mesh::MeshHelper;
use crate::prelude::{SurfaceError, SurfaceResult};

/// Interpolating cubic spline through `(knot, value)` pairs.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    second: Vec<f64>,
}

impl CubicSpline {
    /// Fits the spline by solving the tridiagonal system for the second
    /// derivatives at each knot.
    pub fn fit(knots: &[f64], values: &[f64]) -> SurfaceResult<Self> {
        let n = knots.len();
        if n != values.len() {
            return Err(SurfaceError::Shape(format!(
                "spline has {} knots but {} values",
                n,
                values.len()
            )));
        }
        if n < 2 {
            return Err(SurfaceError::Shape(format!(
                "spline needs at least 2 knots, got {}",
                n
            )));
        }
        if !MeshHelper::is_strictly_increasing(knots) {
            return Err(SurfaceError::Shape(
                "spline knots must be finite and strictly increasing".into(),
            ));
        }

        let mut second = vec![0.0; n];
        let mut scratch = vec![0.0; n];
        for i in 1..n - 1 {
            let sig = (knots[i] - knots[i - 1]) / (knots[i + 1] - knots[i - 1]);
            let p = sig * second[i - 1] + 2.0;
            second[i] = (sig - 1.0) / p;
            let slope_delta = (values[i + 1] - values[i]) / (knots[i + 1] - knots[i])
                - (values[i] - values[i - 1]) / (knots[i] - knots[i - 1]);
            scratch[i] =
                (6.0 * slope_delta / (knots[i + 1] - knots[i - 1]) - sig * scratch[i - 1]) / p;
        }
        second[n - 1] = 0.0;
        for k in (0..n - 1).rev() {
            second[k] = second[k] * second[k + 1] + scratch[k];
        }

        Ok(Self {
            knots: knots.to_vec(),
            values: values.to_vec(),
            second,
        })
    }

    /// Value of the spline at `x`, or NaN when `x` lies outside the knots.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.knots.len();
        let lo_bound = self.knots[0];
        let hi_bound = self.knots[n - 1];
        let tolerance = (hi_bound - lo_bound) * 1e-12;
        if x.is_nan() || x < lo_bound - tolerance || x > hi_bound + tolerance {
            return f64::NAN;
        }
        let x = x.clamp(lo_bound, hi_bound);

        let klo = self
            .knots
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(n - 2);
        let khi = klo + 1;
        let h = self.knots[khi] - self.knots[klo];
        let a = (self.knots[khi] - x) / h;
        let b = (x - self.knots[klo]) / h;

        a * self.values[klo]
            + b * self.values[khi]
            + ((a * a * a - a) * self.second[klo] + (b * b * b - b) * self.second[khi]) * h * h
                / 6.0
    }
}
