pub mod reading;
pub mod surface;

pub use reading::ReadingGrid;
pub use surface::{CoordinateAxes, ElevationGrid, FineSurface};
