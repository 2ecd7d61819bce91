use crate::prelude::{SurfaceError, SurfaceResult};
use ndarray::Array2;
use serde::Serialize;

/// Staff readings on a rectangular grid of stations.
///
/// Row `i` holds the stations at northing index `i`, column `j` the stations
/// at easting index `j`. A `ReadingGrid` is always rectangular, at least 2x2
/// and finite; the constructors are the only place that is checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingGrid {
    values: Array2<f64>,
}

impl ReadingGrid {
    /// Builds a grid from field-book rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> SurfaceResult<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);

        if let Some(index) = rows
            .iter()
            .position(|row| row.as_ref().len() != col_count)
        {
            return Err(SurfaceError::Shape(format!(
                "row {} has {} readings, expected {}",
                index,
                rows[index].as_ref().len(),
                col_count
            )));
        }

        let flat: Vec<f64> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        let values = Array2::from_shape_vec((row_count, col_count), flat)
            .map_err(|err| SurfaceError::Shape(err.to_string()))?;
        Self::from_array(values)
    }

    pub fn from_array(values: Array2<f64>) -> SurfaceResult<Self> {
        let (rows, cols) = values.dim();
        if rows < 2 || cols < 2 {
            return Err(SurfaceError::Shape(format!(
                "reading grid must be at least 2x2, got {}x{}",
                rows, cols
            )));
        }
        if let Some(((row, col), _)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SurfaceError::NonFiniteReading { row, col });
        }
        Ok(Self { values })
    }

    /// Same readings with the row order reversed.
    ///
    /// Field books list the far (northern) row first; flipping puts row 0 on
    /// the `y = 0` edge of the map.
    pub fn flipped(&self) -> Self {
        let mut values = self.values.clone();
        values.invert_axis(ndarray::Axis(0));
        Self {
            values: values.as_standard_layout().to_owned(),
        }
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_layout() {
        let grid = ReadingGrid::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(1, 0), Some(4.0));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn ragged_rows_are_a_shape_error() {
        let err = ReadingGrid::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, SurfaceError::Shape(_)));
    }

    #[test]
    fn grids_smaller_than_two_by_two_are_rejected() {
        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            ReadingGrid::from_rows(&empty),
            Err(SurfaceError::Shape(_))
        ));
        assert!(matches!(
            ReadingGrid::from_rows(&[[1.0, 2.0]]),
            Err(SurfaceError::Shape(_))
        ));
    }

    #[test]
    fn non_finite_reading_reports_position() {
        let err = ReadingGrid::from_rows(&[[1.0, 2.0], [3.0, f64::NAN]]).unwrap_err();
        assert_eq!(err, SurfaceError::NonFiniteReading { row: 1, col: 1 });
    }

    #[test]
    fn flipped_reverses_rows_only() {
        let grid = ReadingGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let flipped = grid.flipped();
        assert_eq!(flipped.get(0, 0), Some(5.0));
        assert_eq!(flipped.get(0, 1), Some(6.0));
        assert_eq!(flipped.get(2, 1), Some(2.0));
        assert_eq!(flipped.flipped(), grid);
    }
}
