use crate::math::mesh::MeshHelper;
use crate::prelude::{SurfaceError, SurfaceResult, MAX_LEVELS};
use crate::survey::ElevationGrid;
use serde::Serialize;

/// Quotients this close to a whole number are treated as exact multiples of the step.
const SNAP_TOLERANCE: f64 = 1e-9;
/// Largest level index kept; `k * step` stays exact in an f64 mantissa below it.
const MAX_LEVEL_INDEX: f64 = 4.0e15;

/// Contour thresholds, strictly increasing and `step` apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourLevelSet {
    step: f64,
    levels: Vec<f64>,
}

impl ContourLevelSet {
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.levels.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.levels.last().copied()
    }
}

fn snapped_floor(quotient: f64) -> i64 {
    let nearest = quotient.round();
    if (quotient - nearest).abs() < SNAP_TOLERANCE {
        nearest as i64
    } else {
        quotient.floor() as i64
    }
}

fn snapped_ceil(quotient: f64) -> i64 {
    let nearest = quotient.round();
    if (quotient - nearest).abs() < SNAP_TOLERANCE {
        nearest as i64
    } else {
        quotient.ceil() as i64
    }
}

/// Contour levels from `floor(min/step)*step` up to `ceil(max/step)*step + step`.
///
/// Each level is an integer multiple of `step`, so spacing never drifts. A
/// flat surface gets one extra level below it so the surface is bracketed
/// on both sides.
pub fn derive_contour_levels(
    elevation: &ElevationGrid,
    step: f64,
) -> SurfaceResult<ContourLevelSet> {
    if !(step.is_finite() && step > 0.0) {
        return Err(SurfaceError::Config(format!(
            "contour step must be positive (received {})",
            step
        )));
    }
    let (min, max) = elevation.range();
    let (low, high) = (min / step, max / step);
    if !(low.abs() <= MAX_LEVEL_INDEX && high.abs() <= MAX_LEVEL_INDEX) {
        return Err(SurfaceError::Config(format!(
            "contour step {} is too small for RL range {} to {}",
            step, min, max
        )));
    }
    // Both ends, the padding level above and the flat-surface level below.
    let count = high.ceil() - low.floor() + 3.0;
    if count > MAX_LEVELS as f64 {
        return Err(SurfaceError::Config(format!(
            "contour step {} gives about {} levels, at most {} are allowed",
            step, count, MAX_LEVELS
        )));
    }

    let index_overflow =
        || SurfaceError::Config(format!("contour level index overflow at step {}", step));
    let mut first = snapped_floor(low);
    if first as f64 * step > min {
        first = first.checked_sub(1).ok_or_else(index_overflow)?;
    }
    let last = snapped_ceil(high)
        .checked_add(1)
        .ok_or_else(index_overflow)?;
    if min == max {
        first = first.checked_sub(1).ok_or_else(index_overflow)?;
    }

    let levels = (first..=last).map(|k| k as f64 * step).collect();
    Ok(ContourLevelSet { step, levels })
}

/// `count` evenly spaced thresholds from the lowest to the highest level,
/// used for filled colour bands.
pub fn derive_fill_levels(elevation: &ElevationGrid, count: usize) -> SurfaceResult<Vec<f64>> {
    if !(2..=MAX_LEVELS).contains(&count) {
        return Err(SurfaceError::Config(format!(
            "fill levels must be between 2 and {} (received {})",
            MAX_LEVELS, count
        )));
    }
    let (min, max) = elevation.range();
    Ok(MeshHelper::linspace(min, max, count))
}
