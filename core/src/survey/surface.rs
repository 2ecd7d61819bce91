use crate::math::mesh::MeshHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{SurfaceError, SurfaceResult};
use ndarray::Array2;
use serde::Serialize;

/// Reduced levels, one per station, in the same layout as the readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationGrid {
    instrument_height: Option<f64>,
    values: Array2<f64>,
}

impl ElevationGrid {
    pub(crate) fn reduced(instrument_height: f64, values: Array2<f64>) -> Self {
        Self {
            instrument_height: Some(instrument_height),
            values,
        }
    }

    /// Wraps levels that were reduced elsewhere.
    pub fn from_levels(values: Array2<f64>) -> SurfaceResult<Self> {
        let (rows, cols) = values.dim();
        if rows < 2 || cols < 2 {
            return Err(SurfaceError::Shape(format!(
                "elevation grid must be at least 2x2, got {}x{}",
                rows, cols
            )));
        }
        if let Some(((row, col), _)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SurfaceError::NonFiniteReading { row, col });
        }
        Ok(Self {
            instrument_height: None,
            values,
        })
    }

    /// Datum the levels were reduced from, when they came out of `reduce`.
    pub fn instrument_height(&self) -> Option<f64> {
        self.instrument_height
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// Lowest and highest reduced level.
    pub fn range(&self) -> (f64, f64) {
        // Construction guarantees at least four finite cells.
        StatsHelper::nan_min_max(self.values.iter()).unwrap_or((f64::NAN, f64::NAN))
    }

    pub fn min(&self) -> f64 {
        self.range().0
    }

    pub fn max(&self) -> f64 {
        self.range().1
    }
}

/// At least two finite coordinates, strictly increasing.
fn check_axis(name: &str, axis: &[f64]) -> SurfaceResult<()> {
    if axis.len() < 2 {
        return Err(SurfaceError::Shape(format!(
            "{} axis needs at least 2 coordinates, got {}",
            name,
            axis.len()
        )));
    }
    if !MeshHelper::is_strictly_increasing(axis) {
        return Err(SurfaceError::Config(format!(
            "{} axis must be strictly increasing",
            name
        )));
    }
    Ok(())
}

/// Physical position of each grid sample: `x` per column (easting),
/// `y` per row (northing).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateAxes {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl CoordinateAxes {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> SurfaceResult<Self> {
        check_axis("x", &x)?;
        check_axis("y", &y)?;
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// `(rows, cols)` of the grid these axes describe.
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// `(min, max)` along x.
    pub fn x_bounds(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// `(min, max)` along y.
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.y[0], self.y[self.y.len() - 1])
    }
}

/// Elevation resampled on a dense mesh.
///
/// `z[[row, col]]` is the value at `(x[col], y[row])`. NaN cells carry no
/// data and must be skipped by consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FineSurface {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Array2<f64>,
}

impl FineSurface {
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Array2<f64>) -> SurfaceResult<Self> {
        check_axis("x", &x)?;
        check_axis("y", &y)?;
        if z.dim() != (y.len(), x.len()) {
            return Err(SurfaceError::Shape(format!(
                "surface values are {:?} but mesh is {}x{}",
                z.dim(),
                y.len(),
                x.len()
            )));
        }
        Ok(Self { x, y, z })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.z
    }

    pub fn shape(&self) -> (usize, usize) {
        self.z.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.z.get((row, col)).copied()
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        (self.y[0], self.y[self.y.len() - 1])
    }

    /// Number of cells without data.
    pub fn undefined_cells(&self) -> usize {
        self.z.iter().filter(|v| v.is_nan()).count()
    }

    /// Range of the defined cells, `None` if the whole surface is undefined.
    pub fn range(&self) -> Option<(f64, f64)> {
        StatsHelper::nan_min_max(self.z.iter())
    }
}
