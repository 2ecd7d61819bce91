use crate::workflow::config::SurveyConfig;
use anyhow::Context;
use surfacecore::{ReadingGrid, SurfaceModel, SurfaceReducer};

#[derive(Clone)]
pub struct Runner {
    config: SurveyConfig,
}

impl Runner {
    pub fn new(config: SurveyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    pub fn execute(&self) -> anyhow::Result<SurfaceModel> {
        self.config
            .validate()
            .with_context(|| format!("checking survey {}", self.config.name))?;
        let readings = ReadingGrid::from_rows(&self.config.readings)
            .with_context(|| format!("validating staff readings of {}", self.config.name))?;
        let readings = if self.config.flip_rows {
            readings.flipped()
        } else {
            readings
        };

        let reducer = SurfaceReducer::new(self.config.to_reducer_config());
        let model = reducer
            .run_grid(&readings)
            .with_context(|| format!("reducing survey {}", self.config.name))?;
        Ok(model)
    }
}
