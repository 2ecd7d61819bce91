use crate::prelude::{ReducerConfig, SurfaceResult};
use crate::processing::axes::build_axes;
use crate::processing::interpolate::interpolate;
use crate::processing::isolines::{trace_isolines, Isoline};
use crate::processing::levels::{derive_contour_levels, derive_fill_levels, ContourLevelSet};
use crate::processing::reduce::reduce_grid;
use crate::survey::{CoordinateAxes, ElevationGrid, FineSurface, ReadingGrid};
use crate::telemetry::log::LogManager;
use serde::Serialize;

/// Everything a renderer needs to draw the contour map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceModel {
    pub config: ReducerConfig,
    pub elevation: ElevationGrid,
    pub axes: CoordinateAxes,
    pub surface: FineSurface,
    pub contour_levels: ContourLevelSet,
    pub fill_levels: Vec<f64>,
    pub isolines: Vec<Isoline>,
}

/// One-shot pipeline from staff readings to a [`SurfaceModel`].
#[derive(Debug, Clone)]
pub struct SurfaceReducer {
    config: ReducerConfig,
    logger: LogManager,
}

impl SurfaceReducer {
    pub fn new(config: ReducerConfig) -> Self {
        Self {
            config,
            logger: LogManager::new(),
        }
    }

    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Validates `rows` and runs the full pipeline.
    pub fn run<R: AsRef<[f64]>>(&self, rows: &[R]) -> SurfaceResult<SurfaceModel> {
        self.config.validate()?;
        let readings = ReadingGrid::from_rows(rows)?;
        self.run_grid(&readings)
    }

    pub fn run_grid(&self, readings: &ReadingGrid) -> SurfaceResult<SurfaceModel> {
        self.config.validate()?;
        let config = &self.config;

        let elevation = reduce_grid(readings, config.instrument_height)?;
        let (min, max) = elevation.range();
        self.logger.record(&format!(
            "Reduced {}x{} stations, RL {:.3} to {:.3}",
            elevation.shape().0,
            elevation.shape().1,
            min,
            max
        ));

        let axes = build_axes(elevation.shape(), config.span)?;
        self.logger
            .detail(&format!("Axes span 0 to {} m", config.span));

        let surface = interpolate(&elevation, &axes, config.resolution)?;
        self.logger.record(&format!(
            "Interpolated {}x{} fine mesh, {} cells without data",
            config.resolution,
            config.resolution,
            surface.undefined_cells()
        ));

        let contour_levels = derive_contour_levels(&elevation, config.contour_step)?;
        let fill_levels = derive_fill_levels(&elevation, config.fill_levels)?;
        self.logger.record(&format!(
            "Derived {} contour levels at {} m, {} fill levels",
            contour_levels.len(),
            contour_levels.step(),
            fill_levels.len()
        ));

        let isolines = trace_isolines(&surface, contour_levels.levels());
        let segment_count: usize = isolines.iter().map(|line| line.segments.len()).sum();
        self.logger
            .detail(&format!("Traced {} isoline segments", segment_count));

        Ok(SurfaceModel {
            config: config.clone(),
            elevation,
            axes,
            surface,
            contour_levels,
            fill_levels,
            isolines,
        })
    }
}
