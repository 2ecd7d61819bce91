use crate::workflow::config::SurveyConfig;
use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use surfacecore::prelude::{DEFAULT_CONTOUR_STEP, DEFAULT_FILL_LEVELS, DEFAULT_RESOLUTION};
use surfacecore::processing::interpolate::MIN_SAMPLES_PER_AXIS;

/// Configuration for generating a synthetic staff-reading grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub cols: usize,
    pub span: f64,
    pub instrument_height: f64,
    /// Staff reading at the origin station.
    pub base_reading: f64,
    /// Change in reading per metre of easting.
    pub slope_x: f64,
    /// Change in reading per metre of northing.
    pub slope_y: f64,
    /// Amplitude of a gentle mound across the plot.
    pub undulation: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 11,
            cols: 11,
            span: 20.0,
            instrument_height: 150.0,
            base_reading: 1.5,
            slope_x: 0.02,
            slope_y: -0.01,
            undulation: 0.08,
            noise: 0.005,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    /// `(rows, cols)` once both are large enough for a cubic surface.
    fn checked_dimensions(&self) -> anyhow::Result<(usize, usize)> {
        ensure!(
            self.rows >= MIN_SAMPLES_PER_AXIS && self.cols >= MIN_SAMPLES_PER_AXIS,
            "synthetic survey needs at least {} rows and columns, got {}x{}",
            MIN_SAMPLES_PER_AXIS,
            self.rows,
            self.cols
        );
        ensure!(
            self.span.is_finite() && self.span > 0.0,
            "synthetic survey span must be positive, got {}",
            self.span
        );
        Ok((self.rows, self.cols))
    }
}

fn build_reading_rows(config: &GeneratorConfig) -> anyhow::Result<Vec<Vec<f64>>> {
    let (rows, cols) = config.checked_dimensions()?;
    rows.checked_mul(cols)
        .context("overflow computing station count for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let dx = config.span / (cols - 1) as f64;
    let dy = config.span / (rows - 1) as f64;

    let readings = (0..rows)
        .map(|i| {
            let y = i as f64 * dy;
            (0..cols)
                .map(|j| {
                    let x = j as f64 * dx;
                    let mound = (PI * x / config.span).sin() * (PI * y / config.span).sin();
                    let jitter = if config.noise > 0.0 {
                        rng.gen_range(-config.noise..config.noise)
                    } else {
                        0.0
                    };
                    config.base_reading + config.slope_x * x + config.slope_y * y
                        - config.undulation * mound
                        + jitter
                })
                .collect()
        })
        .collect();

    Ok(readings)
}

pub fn build_survey_from_config(config: &GeneratorConfig) -> anyhow::Result<SurveyConfig> {
    let readings = build_reading_rows(config)?;
    let (_, cols) = config.checked_dimensions()?;
    Ok(SurveyConfig {
        name: format!("Synthetic plot (seed {})", config.seed),
        instrument_height: config.instrument_height,
        span: config.span,
        grid_spacing: config.span / (cols - 1) as f64,
        readings,
        // Generated rows already start at the y = 0 edge.
        flip_rows: false,
        resolution: DEFAULT_RESOLUTION,
        contour_step: DEFAULT_CONTOUR_STEP,
        fill_levels: DEFAULT_FILL_LEVELS,
    })
}

pub fn build_synthetic_survey(rows: usize, cols: usize, seed: u64) -> anyhow::Result<SurveyConfig> {
    let config = GeneratorConfig {
        rows,
        cols,
        seed,
        ..Default::default()
    };
    build_survey_from_config(&config)
}
