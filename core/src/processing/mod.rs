pub mod axes;
pub mod interpolate;
pub mod isolines;
pub mod levels;
pub mod reduce;
pub mod reducer;

pub use axes::build_axes;
pub use interpolate::{interpolate, SplineSurface};
pub use isolines::{trace_isolines, Isoline};
pub use levels::{derive_contour_levels, derive_fill_levels, ContourLevelSet};
pub use reduce::{reduce, reduce_grid};
pub use reducer::{SurfaceModel, SurfaceReducer};
