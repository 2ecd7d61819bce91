pub mod svg;
pub mod table;

pub use svg::{render_contour_map, MapStyle};
pub use table::{render_rl_table, render_summary};
