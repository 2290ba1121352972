//! Corner accent blocks: small random squares filling zones near the canvas corners.

use crate::foundation::core::Rect;
use crate::foundation::error::PosterResult;
use crate::layers::Marks;
use crate::paint::Painter;
use crate::pipeline::LayerCtx;

/// Horizontal extent of a zone row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnSpan {
    /// Same `[x0, x1)` for every row.
    Fixed(i32, i32),
    /// Grows rightward from `inset`: `[inset, min(inset + extent(y), limit))`.
    FromLeft {
        inset: i32,
        pivot: i32,
        rate: f64,
        limit: i32,
    },
    /// Grows leftward from `W - inset`: `[max(W - inset - extent(y), limit), W - inset)`.
    FromRight {
        inset: i32,
        pivot: i32,
        rate: f64,
        limit: i32,
    },
}

impl ColumnSpan {
    /// Column range for row `y` on a canvas `width` pixels wide.
    pub fn columns(&self, y: i32, width: i32) -> (i32, i32) {
        let extent = |pivot: i32, rate: f64| (f64::from((y - pivot).abs()) * rate) as i32;
        match *self {
            Self::Fixed(x0, x1) => (x0, x1),
            Self::FromLeft {
                inset,
                pivot,
                rate,
                limit,
            } => (inset, (inset + extent(pivot, rate)).min(limit)),
            Self::FromRight {
                inset,
                pivot,
                rate,
                limit,
            } => (
                (width - inset - extent(pivot, rate)).max(limit),
                width - inset,
            ),
        }
    }
}

/// One zone: rows `[y0, y1)`, a column span per row, a fill probability and alpha range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockZone {
    pub rows: (i32, i32),
    pub columns: ColumnSpan,
    pub fill_p: f64,
    pub alpha: (i32, i32),
}

impl BlockZone {
    pub fn rect(x0: i32, y0: i32, x1: i32, y1: i32, fill_p: f64, alpha: (i32, i32)) -> Self {
        Self {
            rows: (y0, y1),
            columns: ColumnSpan::Fixed(x0, x1),
            fill_p,
            alpha,
        }
    }
}

/// Grid of candidate squares over each zone; each is filled with probability `fill_p`.
///
/// Per filled square the random draws are: fill test, bright color, alpha.
#[derive(Clone, Debug)]
pub struct AccentBlocks {
    pub block: i32,
    pub step: i32,
    pub zones: Vec<BlockZone>,
}

impl AccentBlocks {
    /// Top-left corners of every candidate square in `zone`.
    pub fn slots(&self, zone: &BlockZone, width: i32) -> Vec<(i32, i32)> {
        let step = self.step.max(1) as usize;
        let mut out = Vec::new();
        for y in (zone.rows.0..zone.rows.1).step_by(step) {
            let (x0, x1) = zone.columns.columns(y, width);
            for x in (x0..x1).step_by(step) {
                out.push((x, y));
            }
        }
        out
    }
}

impl Marks for AccentBlocks {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        let width = ctx.size.width as i32;
        let b = f64::from(self.block);

        for zone in &self.zones {
            for (x, y) in self.slots(zone, width) {
                if !ctx.rng.chance(zone.fill_p) {
                    continue;
                }
                let color = ctx.rng.choose(&ctx.palette.brights);
                let a = ctx.rng.randint(zone.alpha.0, zone.alpha.1);
                let (x, y) = (f64::from(x), f64::from(y));
                painter.fill_rect(
                    Rect::new(x, y, x + b, y + b),
                    color.with_alpha(a.clamp(0, 255) as u8),
                );
            }
        }
        Ok(())
    }
}
