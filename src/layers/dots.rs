//! Scattered filled circles along flow axes and around focal points.

use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::PosterResult;
use crate::layers::{Marks, span};
use crate::paint::Painter;
use crate::pipeline::LayerCtx;

/// Where a flow places its dots.
#[derive(Clone, Debug)]
pub enum Flow {
    /// `x` uniform in `x_range`, `y = y + randint(-spread, spread)`.
    Horizontal {
        y: i32,
        spread: i32,
        x_range: (i32, i32),
    },
    /// `x = x + randint(-spread, spread)`, `y` uniform in `y_range`.
    Vertical {
        x: i32,
        spread: i32,
        y_range: (i32, i32),
    },
    /// A point at `t` in `[0.05, 0.95)` along `from -> to`, jittered on both axes.
    Diagonal { from: Point, to: Point, jitter: i32 },
}

/// `count` dots drawn along one flow.
///
/// Per dot the random draws happen in this order: position, radius, color, alpha. With a
/// `clip` rectangle, a dot whose position falls outside is dropped before the remaining draws.
#[derive(Clone, Debug)]
pub struct FlowDots {
    pub flow: Flow,
    pub count: usize,
    pub radius: (i32, i32),
    pub colors: Vec<Rgb8>,
    pub alpha: (i32, i32),
    pub clip: Option<Rect>,
}

impl FlowDots {
    fn position(&self, ctx: &mut LayerCtx<'_>) -> Option<(i32, i32)> {
        let rng = &mut *ctx.rng;
        match self.flow {
            Flow::Horizontal { y, spread, x_range } => {
                let (lo, hi) = span(x_range.0, x_range.1)?;
                let x = rng.randint(lo, hi);
                Some((x, y + rng.randint(-spread, spread)))
            }
            Flow::Vertical { x, spread, y_range } => {
                let (lo, hi) = span(y_range.0, y_range.1)?;
                let dx = rng.randint(-spread, spread);
                Some((x + dx, rng.randint(lo, hi)))
            }
            Flow::Diagonal { from, to, jitter } => {
                let t = rng.uniform(0.05, 0.95);
                let bx = (from.x + (to.x - from.x) * t) as i32;
                let by = (from.y + (to.y - from.y) * t) as i32;
                let x = bx + rng.randint(-jitter, jitter);
                let y = by + rng.randint(-jitter, jitter);
                Some((x, y))
            }
        }
    }
}

impl Marks for FlowDots {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        if self.colors.is_empty() {
            return Ok(());
        }
        for _ in 0..self.count {
            let Some((x, y)) = self.position(ctx) else {
                // Inverted range on a small canvas: the flow has nowhere to go.
                return Ok(());
            };
            let p = Point::new(f64::from(x), f64::from(y));
            if self.clip.is_some_and(|c| !inside(c, p)) {
                continue;
            }
            let r = ctx.rng.randint(self.radius.0, self.radius.1);
            let color = ctx.rng.choose(&self.colors);
            let a = ctx.rng.randint(self.alpha.0, self.alpha.1);
            painter.fill_circle(p, f64::from(r), color.with_alpha(a.clamp(0, 255) as u8));
        }
        Ok(())
    }
}

fn inside(rect: Rect, p: Point) -> bool {
    (rect.x0..rect.x1).contains(&p.x) && (rect.y0..rect.y1).contains(&p.y)
}

/// Gaussian cluster of dots around `center`.
///
/// Per dot: angle, radial distance, size, color, alpha.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub center: Point,
    pub count: usize,
    pub sigma: f64,
    pub size: (i32, i32),
    pub colors: Vec<Rgb8>,
    pub alpha: (i32, i32),
}

impl Marks for Cluster {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        if self.colors.is_empty() {
            return Ok(());
        }
        let rng = &mut *ctx.rng;
        for _ in 0..self.count {
            let angle = rng.uniform(0.0, std::f64::consts::TAU);
            let r = rng.gauss(0.0, self.sigma);
            let x = self.center.x + (r * angle.cos()).trunc();
            let y = self.center.y + (r * angle.sin()).trunc();
            let size = rng.randint(self.size.0, self.size.1);
            let color = rng.choose(&self.colors);
            let a = rng.randint(self.alpha.0, self.alpha.1);
            painter.fill_circle(
                Point::new(x, y),
                f64::from(size),
                color.with_alpha(a.clamp(0, 255) as u8),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::foundation::rng::Rng64;
    use crate::palette::{Palette, WHITE};
    use crate::text::{FontBook, TextEngine};

    fn run(marks: &dyn Marks, size: Size, seed: u64) -> (crate::layer::Layer, Rng64) {
        let palette = Palette::fluorescent();
        let mut rng = Rng64::new(seed);
        let mut text = TextEngine::new(FontBook::new(None).with_system_fallback(false));
        let mut painter = Painter::new(size);
        let mut ctx = LayerCtx {
            size,
            palette: &palette,
            rng: &mut rng,
            text: &mut text,
        };
        marks.paint(&mut painter, &mut ctx).unwrap();
        (painter.finish().unwrap(), rng)
    }

    #[test]
    fn horizontal_flow_stays_in_its_band() {
        let dots = FlowDots {
            flow: Flow::Horizontal {
                y: 50,
                spread: 4,
                x_range: (10, 90),
            },
            count: 40,
            radius: (1, 2),
            colors: vec![WHITE],
            alpha: (200, 250),
            clip: None,
        };
        let (layer, _) = run(&dots, Size::new(100, 100).unwrap(), 9);
        assert!(!layer.is_fully_transparent());
        for y in (0..40).chain(60..100) {
            for x in 0..100 {
                assert_eq!(layer.pixel(x, y).map(|p| p[3]), Some(0), "({x},{y})");
            }
        }
    }

    #[test]
    fn clipped_dots_skip_remaining_draws() {
        let outside = FlowDots {
            flow: Flow::Diagonal {
                from: Point::new(500.0, 500.0),
                to: Point::new(600.0, 600.0),
                jitter: 0,
            },
            count: 10,
            radius: (2, 5),
            colors: vec![WHITE],
            alpha: (150, 240),
            clip: Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        };
        let (layer, rng_after) = run(&outside, Size::new(100, 100).unwrap(), 4);
        assert!(layer.is_fully_transparent());

        // Only position draws happened: uniform + two jitters per dot.
        let mut expected = Rng64::new(4);
        for _ in 0..10 {
            expected.uniform(0.05, 0.95);
            expected.randint(0, 0);
            expected.randint(0, 0);
        }
        let mut rng_after = rng_after;
        assert_eq!(rng_after.next_u64(), expected.next_u64());
    }

    #[test]
    fn cluster_is_deterministic() {
        let c = Cluster {
            center: Point::new(32.0, 32.0),
            count: 20,
            sigma: 6.0,
            size: (1, 3),
            colors: vec![WHITE],
            alpha: (180, 255),
        };
        let size = Size::new(64, 64).unwrap();
        assert_eq!(run(&c, size, 77).0, run(&c, size, 77).0);
    }
}
