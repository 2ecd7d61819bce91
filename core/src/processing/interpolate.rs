//! Cubic resampling of the reduced levels onto a fine mesh.
//!
//! The surface is a tensor-product natural cubic spline: every surveyed row
//! gets a spline along the easting axis, and the row splines evaluated at a
//! given easting are joined by a spline along the northing axis. Anything
//! outside the surveyed rectangle is NaN.

use crate::math::mesh::MeshHelper;
use crate::math::spline::CubicSpline;
use crate::prelude::{SurfaceError, SurfaceResult, MAX_RESOLUTION};
use crate::survey::{CoordinateAxes, ElevationGrid, FineSurface};
use ndarray::Array2;

/// Samples per axis below which a cubic fit is not trusted.
pub const MIN_SAMPLES_PER_AXIS: usize = 4;

/// Smooth surface through the gridded samples.
#[derive(Debug, Clone)]
pub struct SplineSurface {
    y: Vec<f64>,
    rows: Vec<CubicSpline>,
}

impl SplineSurface {
    pub fn fit(elevation: &ElevationGrid, axes: &CoordinateAxes) -> SurfaceResult<Self> {
        let (rows, cols) = elevation.shape();
        if axes.shape() != (rows, cols) {
            return Err(SurfaceError::Shape(format!(
                "axes describe a {}x{} grid but elevations are {}x{}",
                axes.shape().0,
                axes.shape().1,
                rows,
                cols
            )));
        }
        if rows < MIN_SAMPLES_PER_AXIS || cols < MIN_SAMPLES_PER_AXIS {
            return Err(SurfaceError::InsufficientData {
                rows,
                cols,
                needed: MIN_SAMPLES_PER_AXIS,
            });
        }

        let row_splines = elevation
            .values()
            .outer_iter()
            .map(|row| CubicSpline::fit(axes.x(), &row.to_vec()))
            .collect::<SurfaceResult<Vec<_>>>()?;

        Ok(Self {
            y: axes.y().to_vec(),
            rows: row_splines,
        })
    }

    /// Surface value at `(x, y)`; NaN outside the surveyed rectangle.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.column_at(x)
            .map(|column| column.evaluate(y))
            .unwrap_or(f64::NAN)
    }

    /// Evaluates the surface on every `(x[col], y[row])` of a mesh.
    pub fn evaluate_mesh(&self, mesh_x: &[f64], mesh_y: &[f64]) -> Array2<f64> {
        let mut z = Array2::from_elem((mesh_y.len(), mesh_x.len()), f64::NAN);
        for (col, &x) in mesh_x.iter().enumerate() {
            if let Some(column) = self.column_at(x) {
                for (row, &y) in mesh_y.iter().enumerate() {
                    z[[row, col]] = column.evaluate(y);
                }
            }
        }
        z
    }

    /// Spline along y through the row splines evaluated at `x`.
    fn column_at(&self, x: f64) -> Option<CubicSpline> {
        let samples: Vec<f64> = self.rows.iter().map(|row| row.evaluate(x)).collect();
        if samples.iter().any(|v| v.is_nan()) {
            return None;
        }
        CubicSpline::fit(&self.y, &samples).ok()
    }
}

/// Resamples `elevation` onto a `resolution x resolution` mesh spanning the
/// same bounds as `axes`.
pub fn interpolate(
    elevation: &ElevationGrid,
    axes: &CoordinateAxes,
    resolution: usize,
) -> SurfaceResult<FineSurface> {
    if !(2..=MAX_RESOLUTION).contains(&resolution) {
        return Err(SurfaceError::Config(format!(
            "resolution must be between 2 and {} (received {})",
            MAX_RESOLUTION, resolution
        )));
    }
    let surface = SplineSurface::fit(elevation, axes)?;

    let (x_min, x_max) = axes.x_bounds();
    let (y_min, y_max) = axes.y_bounds();
    let mesh_x = MeshHelper::linspace(x_min, x_max, resolution);
    let mesh_y = MeshHelper::linspace(y_min, y_max, resolution);
    let z = surface.evaluate_mesh(&mesh_x, &mesh_y);

    FineSurface::new(mesh_x, mesh_y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::axes::build_axes;

    fn grid_from_fn(
        rows: usize,
        cols: usize,
        span: f64,
        f: impl Fn(f64, f64) -> f64,
    ) -> (ElevationGrid, CoordinateAxes) {
        let axes = build_axes((rows, cols), span).unwrap();
        let values =
            Array2::from_shape_fn((rows, cols), |(i, j)| f(axes.x()[j], axes.y()[i]));
        (ElevationGrid::from_levels(values).unwrap(), axes)
    }

    #[test]
    fn fine_surface_spans_axis_bounds() {
        let (grid, axes) = grid_from_fn(5, 6, 20.0, |x, y| 100.0 + 0.1 * x - 0.05 * y);
        let fine = interpolate(&grid, &axes, 50).unwrap();
        assert_eq!(fine.shape(), (50, 50));
        assert_eq!(fine.x_bounds(), axes.x_bounds());
        assert_eq!(fine.y_bounds(), axes.y_bounds());
        assert_eq!(fine.undefined_cells(), 0);
    }

    #[test]
    fn planar_surface_is_reproduced() {
        let plane = |x: f64, y: f64| 148.9 + 0.02 * x + 0.03 * y;
        let (grid, axes) = grid_from_fn(4, 4, 20.0, plane);
        let fine = interpolate(&grid, &axes, 21).unwrap();
        for (row, &y) in fine.y().iter().enumerate() {
            for (col, &x) in fine.x().iter().enumerate() {
                assert!((fine.get(row, col).unwrap() - plane(x, y)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn samples_are_honoured_at_stations() {
        let (grid, axes) = grid_from_fn(5, 5, 8.0, |x, y| (x * 0.7).sin() + (y * 0.4).cos());
        // With 5 samples over 8 m and resolution 9, every other mesh node is a station.
        let fine = interpolate(&grid, &axes, 9).unwrap();
        for i in 0..5 {
            for j in 0..5 {
                let station = grid.get(i, j).unwrap();
                assert!((fine.get(2 * i, 2 * j).unwrap() - station).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn outside_hull_is_nan() {
        let (grid, axes) = grid_from_fn(4, 4, 10.0, |x, y| x + y);
        let surface = SplineSurface::fit(&grid, &axes).unwrap();
        assert!(surface.evaluate(-0.5, 5.0).is_nan());
        assert!(surface.evaluate(5.0, 10.5).is_nan());
        assert!((surface.evaluate(5.0, 5.0) - 10.0).abs() < 1e-9);

        let z = surface.evaluate_mesh(&[-1.0, 5.0], &[5.0, 11.0]);
        assert!(z[[0, 0]].is_nan());
        assert!(!z[[0, 1]].is_nan());
        assert!(z[[1, 1]].is_nan());
    }

    #[test]
    fn three_by_three_is_insufficient() {
        let (grid, axes) = grid_from_fn(3, 3, 10.0, |x, y| x * y);
        let err = interpolate(&grid, &axes, 10).unwrap_err();
        assert_eq!(
            err,
            SurfaceError::InsufficientData {
                rows: 3,
                cols: 3,
                needed: MIN_SAMPLES_PER_AXIS
            }
        );
    }

    #[test]
    fn bad_resolution_and_mismatched_axes_are_rejected() {
        let (grid, axes) = grid_from_fn(4, 4, 10.0, |x, _| x);
        assert!(matches!(interpolate(&grid, &axes, 1), Err(SurfaceError::Config(_))));
        assert!(matches!(
            interpolate(&grid, &axes, MAX_RESOLUTION + 1),
            Err(SurfaceError::Config(_))
        ));

        let other_axes = build_axes((5, 4), 10.0).unwrap();
        assert!(matches!(
            interpolate(&grid, &other_axes, 10),
            Err(SurfaceError::Shape(_))
        ));
    }
}
