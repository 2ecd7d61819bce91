pub mod mesh;
pub mod spline;
pub mod stats;

pub use mesh::MeshHelper;
pub use spline::CubicSpline;
pub use stats::StatsHelper;
