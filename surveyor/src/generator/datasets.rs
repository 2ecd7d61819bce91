use crate::workflow::config::SurveyConfig;
use surfacecore::prelude::{DEFAULT_CONTOUR_STEP, DEFAULT_FILL_LEVELS, DEFAULT_RESOLUTION};

/// Names accepted by [`builtin_survey`].
pub const BUILTIN_SURVEYS: [&str; 2] = ["admin-mining", "tacheo-site"];

const ADMIN_MINING_READINGS: [[f64; 11]; 11] = [
    [1.210, 1.230, 1.190, 1.190, 1.230, 1.350, 1.355, 1.400, 1.400, 1.430, 1.425],
    [1.215, 1.215, 1.215, 1.230, 1.280, 1.300, 1.375, 1.410, 1.410, 1.390, 1.395],
    [1.250, 1.230, 1.230, 1.265, 1.325, 1.370, 1.450, 1.400, 1.400, 1.385, 1.415],
    [1.265, 1.240, 1.250, 1.330, 1.365, 1.385, 1.410, 1.380, 1.380, 1.385, 1.375],
    [1.335, 1.320, 1.320, 1.370, 1.395, 1.395, 1.425, 1.370, 1.370, 1.340, 1.380],
    [1.360, 1.345, 1.350, 1.385, 1.450, 1.440, 1.350, 1.345, 1.350, 1.360, 1.390],
    [1.410, 1.395, 1.390, 1.435, 1.425, 1.450, 1.335, 1.375, 1.375, 1.380, 1.450],
    [1.460, 1.445, 1.450, 1.415, 1.415, 1.400, 1.355, 1.380, 1.380, 1.385, 1.415],
    [1.455, 1.450, 1.440, 1.450, 1.410, 1.325, 1.355, 1.360, 1.365, 1.390, 1.395],
    [1.460, 1.440, 1.410, 1.410, 1.395, 1.260, 1.355, 1.395, 1.395, 1.450, 1.425],
    [1.455, 1.410, 1.360, 1.450, 1.365, 1.310, 1.370, 1.450, 1.415, 1.420, 1.450],
];

const TACHEO_SITE_READINGS: [[f64; 11]; 11] = [
    [1.890, 1.930, 1.925, 1.955, 2.020, 2.155, 2.240, 2.320, 2.395, 2.425, 2.450],
    [1.815, 1.860, 1.895, 1.940, 2.030, 2.095, 2.250, 2.295, 2.320, 2.365, 2.440],
    [1.775, 1.820, 1.850, 1.925, 2.025, 2.100, 2.200, 2.245, 2.280, 2.350, 2.415],
    [1.850, 1.780, 1.830, 1.940, 2.020, 2.100, 2.165, 2.185, 2.245, 2.275, 2.335],
    [1.760, 1.810, 1.845, 1.940, 2.010, 2.070, 2.145, 2.145, 2.155, 2.255, 2.350],
    [1.760, 1.785, 1.830, 1.910, 1.980, 2.045, 2.030, 2.080, 2.150, 2.230, 2.295],
    [1.700, 1.790, 1.835, 1.915, 1.965, 2.010, 1.985, 2.070, 2.125, 2.210, 2.150],
    [1.720, 1.800, 1.855, 1.870, 1.915, 1.965, 1.985, 2.070, 2.125, 2.210, 2.150],
    [1.730, 1.770, 1.810, 1.835, 1.895, 1.875, 1.965, 2.020, 2.110, 2.170, 2.280],
    [1.655, 1.735, 1.755, 1.820, 1.855, 1.800, 1.950, 2.040, 2.110, 2.060, 2.260],
    [1.695, 1.700, 1.700, 1.800, 1.850, 1.835, 1.965, 2.050, 2.120, 2.180, 2.240],
];

fn field_book(
    name: &str,
    instrument_height: f64,
    readings: &[[f64; 11]; 11],
) -> SurveyConfig {
    SurveyConfig {
        name: name.to_string(),
        instrument_height,
        span: 20.0,
        grid_spacing: 2.0,
        readings: readings.iter().map(|row| row.to_vec()).collect(),
        flip_rows: true,
        resolution: DEFAULT_RESOLUTION,
        contour_step: DEFAULT_CONTOUR_STEP,
        fill_levels: DEFAULT_FILL_LEVELS,
    }
}

/// Field books of the two surveyed sites, 2 m stations over a 20 m square.
pub fn builtin_survey(name: &str) -> Option<SurveyConfig> {
    match name {
        "admin-mining" => Some(field_book(
            "Area between Admin building and Mining Department",
            150.355,
            &ADMIN_MINING_READINGS,
        )),
        "tacheo-site" => Some(field_book(
            "Tacheometric survey site",
            150.250,
            &TACHEO_SITE_READINGS,
        )),
        _ => None,
    }
}
