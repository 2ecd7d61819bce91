use crate::math::mesh::MeshHelper;
use crate::prelude::{SurfaceError, SurfaceResult};
use crate::survey::CoordinateAxes;

/// Evenly spaced station coordinates from 0 to `span` for a `(rows, cols)` grid.
pub fn build_axes(grid_shape: (usize, usize), span: f64) -> SurfaceResult<CoordinateAxes> {
    if !(span.is_finite() && span > 0.0) {
        return Err(SurfaceError::Config(format!(
            "span must be positive (received {})",
            span
        )));
    }
    let (rows, cols) = grid_shape;
    if rows < 2 || cols < 2 {
        return Err(SurfaceError::Shape(format!(
            "axes need at least 2 samples per dimension, got {}x{}",
            rows, cols
        )));
    }
    CoordinateAxes::new(
        MeshHelper::linspace(0.0, span, cols),
        MeshHelper::linspace(0.0, span, rows),
    )
}
