use std::fmt::Write;
use surfacecore::SurfaceModel;

/// Render the reduced levels as a table, northing rows against easting columns.
///
/// Row 0 is the `y = 0` edge, so the table reads bottom-up like the map.
#[must_use]
pub fn render_rl_table(model: &SurfaceModel) -> String {
    let mut output = String::new();
    let axes = &model.axes;

    output.push_str("   ");
    for x in axes.x() {
        write!(&mut output, "{:6.1}m ", x).expect("writing to string cannot fail");
    }
    output.push('\n');
    output.push_str(&"-".repeat(8 * axes.x().len() + 4));
    output.push('\n');

    for (row, y) in axes.y().iter().enumerate() {
        write!(&mut output, "{:4.1}m|", y).expect("writing to string cannot fail");
        for col in 0..axes.x().len() {
            let level = model.elevation.get(row, col).unwrap_or(f64::NAN);
            write!(&mut output, "{:7.3} ", level).expect("writing to string cannot fail");
        }
        output.push('\n');
    }

    output
}

/// Render the RL range, the contour levels and the fine-mesh coverage.
#[must_use]
pub fn render_summary(name: &str, model: &SurfaceModel) -> String {
    let mut output = String::new();
    let (min, max) = model.elevation.range();

    writeln!(
        &mut output,
        "Contour map (HOI = {:.3} m): {}",
        model.config.instrument_height, name
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "Calculated RL Range: {:.3}m to {:.3}m", min, max)
        .expect("writing to string cannot fail");

    let levels: Vec<String> = model
        .contour_levels
        .levels()
        .iter()
        .map(|level| format!("{:.2}", level))
        .collect();
    writeln!(
        &mut output,
        "Using Contour Levels ({} m): [{}]",
        model.contour_levels.step(),
        levels.join(", ")
    )
    .expect("writing to string cannot fail");

    let (rows, cols) = model.surface.shape();
    writeln!(
        &mut output,
        "Fine surface: {}x{} cells, {} without data",
        rows,
        cols,
        model.surface.undefined_cells()
    )
    .expect("writing to string cannot fail");

    output
}
