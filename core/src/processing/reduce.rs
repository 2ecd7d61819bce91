use crate::prelude::{SurfaceError, SurfaceResult};
use crate::survey::{ElevationGrid, ReadingGrid};

/// Reduces field-book rows to reduced levels: `RL = HOI - reading`.
///
/// The rows are validated first, so a ragged grid fails with
/// [`SurfaceError::Shape`] before anything is computed.
pub fn reduce<R: AsRef<[f64]>>(
    rows: &[R],
    instrument_height: f64,
) -> SurfaceResult<ElevationGrid> {
    let readings = ReadingGrid::from_rows(rows)?;
    reduce_grid(&readings, instrument_height)
}

/// Reduces an already validated reading grid.
pub fn reduce_grid(
    readings: &ReadingGrid,
    instrument_height: f64,
) -> SurfaceResult<ElevationGrid> {
    if !instrument_height.is_finite() {
        return Err(SurfaceError::Config(format!(
            "instrument height must be finite (received {})",
            instrument_height
        )));
    }
    let levels = readings.values().mapv(|reading| instrument_height - reading);
    Ok(ElevationGrid::reduced(instrument_height, levels))
}
