pub mod datasets;
pub mod profile;
