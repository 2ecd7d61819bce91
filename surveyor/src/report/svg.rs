//! SVG contour map of a reduced survey.
//!
//! The map draws the surveyed square in physical metres with equal scale on
//! both axes: optional filled colour bands from the fine surface, the
//! station grid, isolines with their levels, and every station with its RL.

use std::fmt::Write;
use surfacecore::SurfaceModel;

const CANVAS_WIDTH: f64 = 900.0;
const CANVAS_HEIGHT: f64 = 950.0;
const PAD_LEFT: f64 = 80.0;
const PAD_RIGHT: f64 = 40.0;
const PAD_TOP: f64 = 90.0;
const PAD_BOTTOM: f64 = 80.0;

/// Low and high ends of the fill colour ramp (blue to yellow).
const RAMP_LOW: (f64, f64, f64) = (0.0, 34.0, 78.0);
const RAMP_HIGH: (f64, f64, f64) = (254.0, 232.0, 56.0);

#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Physical margin drawn around the surveyed square, in metres.
    pub margin: f64,
    /// Draw filled colour bands under the isolines.
    pub filled: bool,
    pub line_colour: &'static str,
}

impl MapStyle {
    /// Blue isolines on white, half a grid spacing of margin.
    pub fn plain(grid_spacing: f64) -> Self {
        Self {
            margin: grid_spacing / 2.0,
            filled: false,
            line_colour: "blue",
        }
    }

    /// Black isolines over filled colour bands.
    pub fn coloured(grid_spacing: f64) -> Self {
        Self {
            margin: grid_spacing / 2.0,
            filled: true,
            line_colour: "black",
        }
    }
}

/// Maps physical coordinates onto the canvas.
struct Viewport {
    x_min: f64,
    y_min: f64,
    scale: f64,
    plot_bottom: f64,
}

impl Viewport {
    fn new(model: &SurfaceModel, margin: f64) -> Self {
        let (x_lo, x_hi) = model.axes.x_bounds();
        let (y_lo, y_hi) = model.axes.y_bounds();
        let x_min = x_lo - margin;
        let y_min = y_lo - margin;
        let width = (x_hi + margin) - x_min;
        let height = (y_hi + margin) - y_min;
        let plot_w = CANVAS_WIDTH - PAD_LEFT - PAD_RIGHT;
        let plot_h = CANVAS_HEIGHT - PAD_TOP - PAD_BOTTOM;
        let scale = (plot_w / width).min(plot_h / height);
        Self {
            x_min,
            y_min,
            scale,
            plot_bottom: PAD_TOP + height * scale,
        }
    }

    fn px(&self, x: f64, y: f64) -> (f64, f64) {
        (
            PAD_LEFT + (x - self.x_min) * self.scale,
            self.plot_bottom - (y - self.y_min) * self.scale,
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn ramp_colour(fraction: f64) -> String {
    let t = fraction.clamp(0.0, 1.0);
    let mix = |lo: f64, hi: f64| (lo + (hi - lo) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(RAMP_LOW.0, RAMP_HIGH.0),
        mix(RAMP_LOW.1, RAMP_HIGH.1),
        mix(RAMP_LOW.2, RAMP_HIGH.2)
    )
}

/// Index of the fill band holding `value`, from 0 to `levels.len() - 2`.
fn fill_band(levels: &[f64], value: f64) -> usize {
    let bands = levels.len().saturating_sub(1).max(1);
    let above = levels.iter().filter(|&&level| level <= value).count();
    above.saturating_sub(1).min(bands - 1)
}

fn write_fill(out: &mut String, model: &SurfaceModel, view: &Viewport) -> std::fmt::Result {
    let surface = &model.surface;
    let xs = surface.x();
    let ys = surface.y();
    let cell_w = (xs[1] - xs[0]) * view.scale;
    let cell_h = (ys[1] - ys[0]) * view.scale;
    let bands = model.fill_levels.len().saturating_sub(1).max(1);
    let denominator = bands.saturating_sub(1).max(1) as f64;

    writeln!(out, r#"<g opacity="0.7" shape-rendering="crispEdges">"#)?;
    for ((row, col), &value) in surface.values().indexed_iter() {
        if value.is_nan() {
            continue;
        }
        let band = fill_band(&model.fill_levels, value);
        let (cx, cy) = view.px(xs[col], ys[row]);
        writeln!(
            out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            cx - cell_w / 2.0,
            cy - cell_h / 2.0,
            cell_w,
            cell_h,
            ramp_colour(band as f64 / denominator)
        )?;
    }
    writeln!(out, "</g>")
}

fn write_grid(out: &mut String, model: &SurfaceModel, view: &Viewport) -> std::fmt::Result {
    let (x_lo, x_hi) = model.axes.x_bounds();
    let (y_lo, y_hi) = model.axes.y_bounds();
    writeln!(
        out,
        r#"<g stroke="grey" stroke-width="0.5" stroke-dasharray="4 3" font-size="10" text-anchor="middle">"#
    )?;
    for &x in model.axes.x() {
        let (px, top) = view.px(x, y_hi);
        let (_, bottom) = view.px(x, y_lo);
        writeln!(
            out,
            r#"<line x1="{px:.2}" y1="{top:.2}" x2="{px:.2}" y2="{bottom:.2}"/>"#
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" stroke="none">{}</text>"#,
            px,
            view.plot_bottom + 18.0,
            x
        )?;
    }
    for &y in model.axes.y() {
        let (left, py) = view.px(x_lo, y);
        let (right, _) = view.px(x_hi, y);
        writeln!(
            out,
            r#"<line x1="{left:.2}" y1="{py:.2}" x2="{right:.2}" y2="{py:.2}"/>"#
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" stroke="none" text-anchor="end">{}</text>"#,
            PAD_LEFT - 8.0,
            py + 3.0,
            y
        )?;
    }
    writeln!(out, "</g>")
}

fn write_isolines(
    out: &mut String,
    model: &SurfaceModel,
    view: &Viewport,
    colour: &str,
) -> std::fmt::Result {
    for line in model.isolines.iter().filter(|line| !line.is_empty()) {
        let mut path = String::new();
        for segment in &line.segments {
            let (x0, y0) = view.px(segment.start.x, segment.start.y);
            let (x1, y1) = view.px(segment.end.x, segment.end.y);
            write!(path, "M{:.2} {:.2}L{:.2} {:.2}", x0, y0, x1, y1)?;
        }
        writeln!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            path, colour
        )?;

        let anchor = &line.segments[line.segments.len() / 2];
        let (lx, ly) = view.px(anchor.start.x, anchor.start.y);
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" font-size="9" fill="{}" text-anchor="middle">{:.2}</text>"#,
            lx, ly, colour, line.level
        )?;
    }
    Ok(())
}

fn write_stations(out: &mut String, model: &SurfaceModel, view: &Viewport) -> std::fmt::Result {
    writeln!(out, r#"<g font-size="8" text-anchor="middle">"#)?;
    for ((row, col), level) in model.elevation.values().indexed_iter() {
        let (px, py) = view.px(model.axes.x()[col], model.axes.y()[row]);
        writeln!(
            out,
            r#"<circle cx="{px:.2}" cy="{py:.2}" r="3" fill="black"/>"#
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}">{:.3}</text>"#,
            px,
            py - 5.0,
            level
        )?;
    }
    writeln!(out, "</g>")
}

fn write_map(
    out: &mut String,
    name: &str,
    model: &SurfaceModel,
    style: &MapStyle,
) -> std::fmt::Result {
    let view = Viewport::new(model, style.margin);

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = CANVAS_WIDTH,
        h = CANVAS_HEIGHT
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="36" font-size="18" text-anchor="middle">Contour Map (HOI = {:.3} m)</text>"#,
        CANVAS_WIDTH / 2.0,
        model.config.instrument_height
    )?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="58" font-size="14" text-anchor="middle">Site: {}</text>"#,
        CANVAS_WIDTH / 2.0,
        escape(name)
    )?;

    if style.filled && model.fill_levels.len() >= 2 {
        write_fill(out, model, &view)?;
    }
    write_grid(out, model, &view)?;
    write_isolines(out, model, &view, style.line_colour)?;
    write_stations(out, model, &view)?;

    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">Easting (m)</text>"#,
        PAD_LEFT + (CANVAS_WIDTH - PAD_LEFT - PAD_RIGHT) / 2.0,
        view.plot_bottom + 42.0
    )?;
    writeln!(
        out,
        r#"<text x="20" y="{:.1}" font-size="12" text-anchor="middle" transform="rotate(-90 20 {:.1})">Northing (m)</text>"#,
        PAD_TOP + (view.plot_bottom - PAD_TOP) / 2.0,
        PAD_TOP + (view.plot_bottom - PAD_TOP) / 2.0
    )?;
    writeln!(out, "</svg>")
}

/// Render the contour map as a standalone SVG document.
#[must_use]
pub fn render_contour_map(name: &str, model: &SurfaceModel, style: &MapStyle) -> String {
    let mut output = String::new();
    write_map(&mut output, name, model, style).expect("writing to string cannot fail");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfacecore::{ReducerConfig, SurfaceReducer};

    fn sloped_model() -> SurfaceModel {
        let mut config = ReducerConfig::new(20.0, 6.0);
        config.resolution = 13;
        config.contour_step = 0.25;
        config.fill_levels = 5;
        let rows: Vec<Vec<f64>> = (0..4)
            .map(|i| (0..4).map(|j| 1.0 + 0.2 * i as f64 + 0.3 * j as f64).collect())
            .collect();
        SurfaceReducer::new(config).run(&rows).unwrap()
    }

    #[test]
    fn plain_map_marks_every_station() {
        let model = sloped_model();
        let svg = render_contour_map("North <field>", &model, &MapStyle::plain(2.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 16);
        assert!(svg.contains("<path"));
        assert!(svg.contains("Site: North &lt;field&gt;"));
        assert!(svg.contains("HOI = 20.000 m"));
        assert!(!svg.contains("<rect x="));
    }

    #[test]
    fn coloured_map_fills_defined_cells() {
        let model = sloped_model();
        let svg = render_contour_map("fill", &model, &MapStyle::coloured(2.0));
        assert_eq!(svg.matches("<rect x=").count(), 13 * 13);
        assert!(svg.contains(r#"stroke="black""#));
    }

    #[test]
    fn fill_band_is_clamped_to_ramp() {
        let levels = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(fill_band(&levels, -5.0), 0);
        assert_eq!(fill_band(&levels, 0.0), 0);
        assert_eq!(fill_band(&levels, 1.5), 1);
        assert_eq!(fill_band(&levels, 3.0), 2);
        assert_eq!(fill_band(&levels, 9.0), 2);
    }

    #[test]
    fn ramp_endpoints() {
        assert_eq!(ramp_colour(0.0), "#00224e");
        assert_eq!(ramp_colour(1.0), "#fee838");
    }
}
