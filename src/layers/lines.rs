//! Guide lines: corridor glow edges, faint diagonals and background grids.

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::PosterResult;
use crate::layers::Marks;
use crate::paint::Painter;
use crate::pipeline::LayerCtx;

/// An open polyline with a uniform stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub width: f64,
    pub color: Rgba8,
}

impl Polyline {
    pub fn segment(from: Point, to: Point, width: f64, color: Rgba8) -> Self {
        Self {
            points: vec![from, to],
            width,
            color,
        }
    }
}

/// A fixed set of stroked polylines.
#[derive(Clone, Debug, Default)]
pub struct Strokes {
    pub lines: Vec<Polyline>,
}

impl Strokes {
    pub fn new(lines: Vec<Polyline>) -> Self {
        Self { lines }
    }

    /// Axis-aligned grid every `spacing` pixels across a `width` x `height` area.
    pub fn grid(width: f64, height: f64, spacing: u32, color: Rgba8) -> Self {
        let mut lines = Vec::new();
        let step = f64::from(spacing.max(1));

        let mut x = 0.0;
        while x < width {
            // Centered on the pixel column so a 1 px line stays crisp.
            let c = x + 0.5;
            lines.push(Polyline::segment(
                Point::new(c, 0.0),
                Point::new(c, height),
                1.0,
                color,
            ));
            x += step;
        }
        let mut y = 0.0;
        while y < height {
            let c = y + 0.5;
            lines.push(Polyline::segment(
                Point::new(0.0, c),
                Point::new(width, c),
                1.0,
                color,
            ));
            y += step;
        }
        Self { lines }
    }

    /// 45° lattice of both diagonal directions with `spacing` between parallel lines,
    /// clipped to `[0, width) x [0, bottom)`.
    pub fn diamond_grid(width: f64, bottom: f64, spacing: u32, color: Rgba8) -> Self {
        let reach = width.max(bottom);
        let step = f64::from(spacing.max(1));
        let mut lines = Vec::new();

        let mut offset = -reach;
        while offset < reach * 2.0 {
            // x = offset + y
            if let Some(line) = clipped_diagonal(offset, 1.0, width, bottom, 1.0, color) {
                lines.push(line);
            }
            // x = (W - offset) - y
            if let Some(line) = clipped_diagonal(width - offset, -1.0, width, bottom, 1.0, color)
            {
                lines.push(line);
            }
            offset += step;
        }
        Self { lines }
    }

    /// Edge lines of a diagonal corridor, `±offset` pixels away from `y = x` and `y = W - x`
    /// along the y axis, clipped above `bottom`.
    pub fn corridor_edges(
        width: f64,
        bottom: f64,
        offset: f64,
        main: Rgba8,
        anti: Rgba8,
        stroke: f64,
    ) -> Self {
        let mut lines = Vec::new();
        for sign in [-1.0, 1.0] {
            // y = x + s  ->  x = y - s
            if let Some(line) = clipped_diagonal(-sign * offset, 1.0, width, bottom, stroke, main)
            {
                lines.push(line);
            }
        }
        for sign in [-1.0, 1.0] {
            // y = W - x + s  ->  x = (W + s) - y
            if let Some(line) =
                clipped_diagonal(width + sign * offset, -1.0, width, bottom, stroke, anti)
            {
                lines.push(line);
            }
        }
        Self { lines }
    }
}

/// The part of `x = x0 + slope * y` inside `[0, width) x [0, bottom)`, if any.
fn clipped_diagonal(
    x0: f64,
    slope: f64,
    width: f64,
    bottom: f64,
    stroke: f64,
    color: Rgba8,
) -> Option<Polyline> {
    // Solve the y interval where 0 <= x0 + slope * y <= width.
    let (ya, yb) = if slope > 0.0 {
        (-x0, width - x0)
    } else {
        (x0 - width, x0)
    };
    let y_start = ya.max(0.0);
    let y_end = yb.min(bottom);
    if y_end - y_start < 1.0 {
        return None;
    }
    let at = |y: f64| Point::new(x0 + slope * y, y);
    Some(Polyline::segment(at(y_start), at(y_end), stroke, color))
}

impl Marks for Strokes {
    fn paint(&self, painter: &mut Painter, _ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        for line in &self.lines {
            painter.stroke_polyline(&line.points, line.width, line.color);
        }
        Ok(())
    }
}
