//! Isoline extraction with marching squares.
//!
//! Each mesh cell is classified by which of its four corners are at or above
//! the level, and the crossing points on the cell edges are found by linear
//! interpolation. Cells touching a NaN corner are skipped, so isolines stop
//! at the edge of the defined surface.

use crate::survey::FineSurface;
use serde::Serialize;

/// A point in physical (easting, northing) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// All segments traced at one contour level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Isoline {
    pub level: f64,
    pub segments: Vec<Segment>,
}

impl Isoline {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Traces one isoline per level; levels that never cross the surface yield
/// an empty isoline.
pub fn trace_isolines(surface: &FineSurface, levels: &[f64]) -> Vec<Isoline> {
    levels
        .iter()
        .map(|&level| Isoline {
            level,
            segments: march_squares(surface, level),
        })
        .collect()
}

fn march_squares(surface: &FineSurface, level: f64) -> Vec<Segment> {
    let (rows, cols) = surface.shape();
    let z = surface.values();
    let xs = surface.x();
    let ys = surface.y();
    let mut segments = Vec::new();

    for row in 0..rows.saturating_sub(1) {
        for col in 0..cols.saturating_sub(1) {
            let bl = z[[row, col]];
            let br = z[[row, col + 1]];
            let tr = z[[row + 1, col + 1]];
            let tl = z[[row + 1, col]];
            if bl.is_nan() || br.is_nan() || tr.is_nan() || tl.is_nan() {
                continue;
            }

            let mut case = 0u8;
            if bl >= level {
                case |= 1;
            }
            if br >= level {
                case |= 2;
            }
            if tr >= level {
                case |= 4;
            }
            if tl >= level {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let (x0, x1) = (xs[col], xs[col + 1]);
            let (y0, y1) = (ys[row], ys[row + 1]);
            let bottom = edge_crossing(Point::new(x0, y0), Point::new(x1, y0), bl, br, level);
            let right = edge_crossing(Point::new(x1, y0), Point::new(x1, y1), br, tr, level);
            let top = edge_crossing(Point::new(x0, y1), Point::new(x1, y1), tl, tr, level);
            let left = edge_crossing(Point::new(x0, y0), Point::new(x0, y1), bl, tl, level);
            let centre_above = (bl + br + tr + tl) / 4.0 >= level;

            let mut push = |start: Point, end: Point| segments.push(Segment { start, end });
            match case {
                1 | 14 => push(left, bottom),
                2 | 13 => push(bottom, right),
                3 | 12 => push(left, right),
                4 | 11 => push(right, top),
                6 | 9 => push(bottom, top),
                7 | 8 => push(left, top),
                // Saddles: the cell centre decides which corners are joined.
                5 if centre_above => {
                    push(left, top);
                    push(bottom, right);
                }
                5 => {
                    push(left, bottom);
                    push(right, top);
                }
                10 if centre_above => {
                    push(left, bottom);
                    push(right, top);
                }
                10 => {
                    push(bottom, right);
                    push(left, top);
                }
                _ => {}
            }
        }
    }

    segments
}

fn edge_crossing(a: Point, b: Point, value_a: f64, value_b: f64, level: f64) -> Point {
    let delta = value_b - value_a;
    if delta.abs() < f64::EPSILON {
        return Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    }
    let t = ((level - value_a) / delta).clamp(0.0, 1.0);
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::mesh::MeshHelper;
    use ndarray::Array2;

    fn ramp(size: usize, span: f64) -> FineSurface {
        let x = MeshHelper::linspace(0.0, span, size);
        let y = MeshHelper::linspace(0.0, span, size);
        let z = Array2::from_shape_fn((size, size), |(_, col)| x[col]);
        FineSurface::new(x, y, z).unwrap()
    }

    #[test]
    fn ramp_isoline_is_vertical() {
        let surface = ramp(11, 10.0);
        let lines = trace_isolines(&surface, &[4.5]);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.segments.len(), 10);
        for segment in &line.segments {
            assert!((segment.start.x - 4.5).abs() < 1e-9);
            assert!((segment.end.x - 4.5).abs() < 1e-9);
        }
    }

    #[test]
    fn level_outside_surface_is_empty() {
        let surface = ramp(5, 4.0);
        let lines = trace_isolines(&surface, &[-1.0, 10.0]);
        assert!(lines.iter().all(Isoline::is_empty));
    }

    #[test]
    fn nan_cells_are_skipped() {
        let x = MeshHelper::linspace(0.0, 2.0, 3);
        let y = x.clone();
        let mut z = Array2::from_shape_fn((3, 3), |(_, col)| x[col]);
        z[[0, 0]] = f64::NAN;
        let surface = FineSurface::new(x, y, z).unwrap();
        let lines = trace_isolines(&surface, &[0.5]);
        // Only the upper-left cell crosses 0.5 with all corners defined.
        assert_eq!(lines[0].segments.len(), 1);
        assert!(lines[0].segments[0].start.y >= 1.0);
    }

    #[test]
    fn closed_ring_around_a_peak() {
        let x = MeshHelper::linspace(-2.0, 2.0, 5);
        let y = x.clone();
        let z = Array2::from_shape_fn((5, 5), |(r, c)| {
            let (px, py) = (x[c], y[r]);
            10.0 - (px * px + py * py)
        });
        let surface = FineSurface::new(x, y, z).unwrap();
        let lines = trace_isolines(&surface, &[8.5]);
        // The plus-shaped region above 8.5 touches twelve cells, each crossed once.
        assert_eq!(lines[0].segments.len(), 12);
    }

    /// Single mesh cell with the given corner values.
    fn cell(bl: f64, br: f64, tl: f64, tr: f64) -> FineSurface {
        let z = ndarray::array![[bl, br], [tl, tr]];
        FineSurface::new(vec![0.0, 1.0], vec![0.0, 1.0], z).unwrap()
    }

    fn assert_point(point: Point, x: f64, y: f64) {
        assert!(
            (point.x - x).abs() < 1e-9 && (point.y - y).abs() < 1e-9,
            "expected ({}, {}), got {:?}",
            x,
            y,
            point
        );
    }

    #[test]
    fn saddle_with_high_diagonal_bl_tr_and_high_centre_cuts_low_corners() {
        let lines = trace_isolines(&cell(1.0, 0.2, 0.2, 1.0), &[0.5]);
        let segments = &lines[0].segments;
        assert_eq!(segments.len(), 2);
        // Left-to-top cuts off the top-left corner, bottom-to-right the bottom-right one.
        assert_point(segments[0].start, 0.0, 0.625);
        assert_point(segments[0].end, 0.375, 1.0);
        assert_point(segments[1].start, 0.625, 0.0);
        assert_point(segments[1].end, 1.0, 0.375);
    }

    #[test]
    fn saddle_with_high_diagonal_bl_tr_and_low_centre_cuts_high_corners() {
        let lines = trace_isolines(&cell(0.8, 0.0, 0.0, 0.8), &[0.5]);
        let segments = &lines[0].segments;
        assert_eq!(segments.len(), 2);
        assert_point(segments[0].start, 0.0, 0.375);
        assert_point(segments[0].end, 0.375, 0.0);
        assert_point(segments[1].start, 1.0, 0.625);
        assert_point(segments[1].end, 0.625, 1.0);
    }

    #[test]
    fn saddle_with_high_diagonal_br_tl_and_high_centre_cuts_low_corners() {
        let lines = trace_isolines(&cell(0.2, 1.0, 1.0, 0.2), &[0.5]);
        let segments = &lines[0].segments;
        assert_eq!(segments.len(), 2);
        assert_point(segments[0].start, 0.0, 0.375);
        assert_point(segments[0].end, 0.375, 0.0);
        assert_point(segments[1].start, 1.0, 0.625);
        assert_point(segments[1].end, 0.625, 1.0);
    }

    #[test]
    fn saddle_with_high_diagonal_br_tl_and_low_centre_cuts_high_corners() {
        let lines = trace_isolines(&cell(0.0, 0.8, 0.8, 0.0), &[0.5]);
        let segments = &lines[0].segments;
        assert_eq!(segments.len(), 2);
        assert_point(segments[0].start, 0.625, 0.0);
        assert_point(segments[0].end, 1.0, 0.375);
        assert_point(segments[1].start, 0.0, 0.625);
        assert_point(segments[1].end, 0.375, 1.0);
    }
}
