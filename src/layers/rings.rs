//! Concentric outlines around a focal point.

use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::PosterResult;
use crate::layers::Marks;
use crate::paint::Painter;
use crate::pipeline::LayerCtx;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub color: Rgb8,
    pub alpha: u8,
    pub width: f64,
}

impl Ring {
    pub const fn new(radius: f64, color: Rgb8, alpha: u8, width: f64) -> Self {
        Self {
            radius,
            color,
            alpha,
            width,
        }
    }
}

/// Outlined circles sharing one center.
#[derive(Clone, Debug)]
pub struct Rings {
    pub center: Point,
    pub rings: Vec<Ring>,
}

impl Marks for Rings {
    fn paint(&self, painter: &mut Painter, _ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        for ring in &self.rings {
            painter.stroke_circle(
                self.center,
                ring.radius,
                ring.width,
                ring.color.with_alpha(ring.alpha),
            );
        }
        Ok(())
    }
}

/// Outlined diamonds (squares rotated 45°) sharing one center.
///
/// Corners that would leave `clip` are pulled back onto its edge, flattening the outline
/// against the border instead of leaving it.
#[derive(Clone, Debug)]
pub struct Diamonds {
    pub center: Point,
    pub rings: Vec<Ring>,
    pub clip: Rect,
}

impl Diamonds {
    /// Closed outline for one diamond, corners clamped into `clip`.
    pub fn outline(&self, size: f64) -> [Point; 5] {
        let c = self.center;
        let clamp = |p: Point| {
            Point::new(
                p.x.clamp(self.clip.x0, self.clip.x1 - 1.0),
                p.y.clamp(self.clip.y0, self.clip.y1 - 1.0),
            )
        };
        [
            clamp(Point::new(c.x, c.y - size)),
            clamp(Point::new(c.x + size, c.y)),
            clamp(Point::new(c.x, c.y + size)),
            clamp(Point::new(c.x - size, c.y)),
            clamp(Point::new(c.x, c.y - size)),
        ]
    }
}

impl Marks for Diamonds {
    fn paint(&self, painter: &mut Painter, _ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        for ring in &self.rings {
            let pts = self.outline(ring.radius);
            painter.stroke_polyline(&pts, ring.width, ring.color.with_alpha(ring.alpha));
        }
        Ok(())
    }
}
