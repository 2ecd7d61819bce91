//! Reduction core for grid levelling surveys.
//!
//! Staff readings go in, reduced levels, a smooth interpolated surface and
//! the contour levels drawn over it come out. Every stage is a pure
//! transformation; rendering and file output belong to the caller.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod survey;
pub mod telemetry;

pub use prelude::{ReducerConfig, SurfaceError, SurfaceResult};
pub use processing::{SurfaceModel, SurfaceReducer};
pub use survey::{CoordinateAxes, ElevationGrid, FineSurface, ReadingGrid};
