use serde::{Deserialize, Serialize};

/// Fine-mesh resolution used by the survey maps.
pub const DEFAULT_RESOLUTION: usize = 200;
/// Contour interval in metres.
pub const DEFAULT_CONTOUR_STEP: f64 = 0.05;
/// Number of filled colour bands between the lowest and highest RL.
pub const DEFAULT_FILL_LEVELS: usize = 20;
/// Upper bound on contour and fill levels in one run.
pub const MAX_LEVELS: usize = 10_000;
/// Upper bound on fine-mesh samples per axis.
pub const MAX_RESOLUTION: usize = 4_096;

/// Shared configuration for a reduction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducerConfig {
    /// Height of instrument (HOI) that every staff reading is taken from.
    pub instrument_height: f64,
    /// Physical side length of the surveyed square, in metres.
    pub span: f64,
    /// Number of fine-mesh samples along each axis.
    pub resolution: usize,
    /// Interval between contour lines.
    pub contour_step: f64,
    /// Number of evenly spaced filled-contour thresholds.
    pub fill_levels: usize,
}

impl ReducerConfig {
    pub fn new(instrument_height: f64, span: f64) -> Self {
        Self {
            instrument_height,
            span,
            resolution: DEFAULT_RESOLUTION,
            contour_step: DEFAULT_CONTOUR_STEP,
            fill_levels: DEFAULT_FILL_LEVELS,
        }
    }

    /// Rejects configurations no stage could run with, before any work starts.
    pub fn validate(&self) -> SurfaceResult<()> {
        if !self.instrument_height.is_finite() {
            return Err(SurfaceError::Config(format!(
                "instrument height must be finite (received {})",
                self.instrument_height
            )));
        }
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(SurfaceError::Config(format!(
                "span must be positive (received {})",
                self.span
            )));
        }
        if !(2..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(SurfaceError::Config(format!(
                "resolution must be between 2 and {} (received {})",
                MAX_RESOLUTION, self.resolution
            )));
        }
        if !(self.contour_step.is_finite() && self.contour_step > 0.0) {
            return Err(SurfaceError::Config(format!(
                "contour step must be positive (received {})",
                self.contour_step
            )));
        }
        if !(2..=MAX_LEVELS).contains(&self.fill_levels) {
            return Err(SurfaceError::Config(format!(
                "fill levels must be between 2 and {} (received {})",
                MAX_LEVELS, self.fill_levels
            )));
        }
        Ok(())
    }
}

/// Common error type for every reduction stage.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("shape error: {0}")]
    Shape(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("insufficient data: cubic fitting needs {needed} samples per axis, grid is {rows}x{cols}")]
    InsufficientData {
        rows: usize,
        cols: usize,
        needed: usize,
    },
    #[error("reading at row {row}, column {col} is not finite")]
    NonFiniteReading { row: usize, col: usize },
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_survey_defaults() {
        let config = ReducerConfig::new(150.355, 20.0);
        assert_eq!(config.resolution, 200);
        assert_eq!(config.contour_step, 0.05);
        assert_eq!(config.fill_levels, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_values() {
        let mut config = ReducerConfig::new(100.0, 0.0);
        assert!(matches!(config.validate(), Err(SurfaceError::Config(_))));

        config.span = 10.0;
        config.contour_step = -0.1;
        assert!(matches!(config.validate(), Err(SurfaceError::Config(_))));

        config.contour_step = 0.1;
        config.resolution = 1;
        assert!(matches!(config.validate(), Err(SurfaceError::Config(_))));

        config.resolution = MAX_RESOLUTION + 1;
        assert!(matches!(config.validate(), Err(SurfaceError::Config(_))));

        config.resolution = MAX_RESOLUTION;
        config.fill_levels = MAX_LEVELS + 1;
        assert!(matches!(config.validate(), Err(SurfaceError::Config(_))));
    }

    #[test]
    fn validate_rejects_nan_height() {
        let config = ReducerConfig::new(f64::NAN, 20.0);
        assert!(matches!(config.validate(), Err(SurfaceError::Config(_))));
    }
}
