use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use surfacecore::prelude::{
    ReducerConfig, DEFAULT_CONTOUR_STEP, DEFAULT_FILL_LEVELS, DEFAULT_RESOLUTION,
};

fn default_flip_rows() -> bool {
    true
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_contour_step() -> f64 {
    DEFAULT_CONTOUR_STEP
}

fn default_fill_levels() -> usize {
    DEFAULT_FILL_LEVELS
}

/// A grid survey as recorded in the field book, plus map settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    pub name: String,
    /// Height of instrument in metres.
    pub instrument_height: f64,
    /// Side of the surveyed square in metres.
    pub span: f64,
    /// Distance between neighbouring stations in metres.
    pub grid_spacing: f64,
    /// Staff readings, one row per line of stations, far row first.
    pub readings: Vec<Vec<f64>>,
    #[serde(default = "default_flip_rows")]
    pub flip_rows: bool,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default = "default_contour_step")]
    pub contour_step: f64,
    #[serde(default = "default_fill_levels")]
    pub fill_levels: usize,
}

impl SurveyConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading survey file {}", path_ref.display()))?;
        let config: SurveyConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing survey file {}", path_ref.display()))?;
        config
            .validate()
            .with_context(|| format!("checking survey file {}", path_ref.display()))?;
        Ok(config)
    }

    /// Checks the map settings the reducer does not see.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.grid_spacing.is_finite() && self.grid_spacing > 0.0,
            "grid spacing must be positive (received {})",
            self.grid_spacing
        );
        Ok(())
    }

    /// Applies command-line overrides for the map settings.
    pub fn with_overrides(
        mut self,
        resolution: Option<usize>,
        contour_step: Option<f64>,
        fill_levels: Option<usize>,
    ) -> Self {
        if let Some(resolution) = resolution {
            self.resolution = resolution;
        }
        if let Some(step) = contour_step {
            self.contour_step = step;
        }
        if let Some(count) = fill_levels {
            self.fill_levels = count;
        }
        self
    }

    pub fn to_reducer_config(&self) -> ReducerConfig {
        ReducerConfig {
            instrument_height: self.instrument_height,
            span: self.span,
            resolution: self.resolution,
            contour_step: self.contour_step,
            fill_levels: self.fill_levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SURVEY_YAML: &[u8] = b"name: test plot
instrument_height: 100.5
span: 6.0
grid_spacing: 2.0
readings:
  - [1.0, 1.1, 1.2, 1.3]
  - [1.1, 1.2, 1.3, 1.4]
  - [1.2, 1.3, 1.4, 1.5]
  - [1.3, 1.4, 1.5, 1.6]
";

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(SURVEY_YAML).unwrap();
        let path = temp.into_temp_path();
        let cfg = SurveyConfig::load(&path).unwrap();
        assert_eq!(cfg.name, "test plot");
        assert_eq!(cfg.readings.len(), 4);
        assert!(cfg.flip_rows);
        assert_eq!(cfg.resolution, DEFAULT_RESOLUTION);
        assert_eq!(cfg.contour_step, DEFAULT_CONTOUR_STEP);
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = SurveyConfig::load("/nonexistent/survey.yaml").unwrap_err();
        assert!(err.to_string().contains("reading survey file"));
    }

    #[test]
    fn config_load_rejects_non_positive_grid_spacing() {
        for spacing in ["0.0", "-2.0"] {
            let yaml = String::from_utf8(SURVEY_YAML.to_vec())
                .unwrap()
                .replace("grid_spacing: 2.0", &format!("grid_spacing: {}", spacing));
            let mut temp = NamedTempFile::new().unwrap();
            temp.write_all(yaml.as_bytes()).unwrap();
            let path = temp.into_temp_path();
            let err = SurveyConfig::load(&path).unwrap_err();
            assert!(format!("{:#}", err).contains("grid spacing must be positive"));
        }
    }

    #[test]
    fn overrides_flow_into_reducer_config() {
        let cfg: SurveyConfig = serde_yaml::from_slice(SURVEY_YAML).unwrap();
        let reducer = cfg
            .with_overrides(Some(64), Some(0.1), None)
            .to_reducer_config();
        assert_eq!(reducer.resolution, 64);
        assert_eq!(reducer.contour_step, 0.1);
        assert_eq!(reducer.fill_levels, DEFAULT_FILL_LEVELS);
        assert_eq!(reducer.instrument_height, 100.5);
        assert_eq!(reducer.span, 6.0);
    }
}
