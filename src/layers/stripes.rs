//! Zebra crossings painted inside the mosaic corridors.

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::foundation::error::PosterResult;
use crate::layers::Marks;
use crate::paint::Painter;
use crate::pipeline::LayerCtx;

/// Bands across a horizontal and a vertical corridor meeting at `center`.
#[derive(Clone, Debug)]
pub struct CrossingZebra {
    pub center: Point,
    pub stripe: u32,
    pub gap: u32,
    /// Bands whose middle lies within this distance of the center are skipped.
    pub skip: f64,
    /// Half the band length across the corridor.
    pub half_length: f64,
    /// Vertical bands start above this y.
    pub bottom: f64,
    pub color: Rgba8,
}

impl CrossingZebra {
    /// Left edges of the bands across the horizontal corridor.
    pub fn horizontal_bands(&self, width: f64) -> Vec<f64> {
        self.band_starts(width, self.center.x)
    }

    /// Top edges of the bands across the vertical corridor.
    pub fn vertical_bands(&self) -> Vec<f64> {
        self.band_starts(self.bottom, self.center.y)
    }

    fn band_starts(&self, end: f64, middle: f64) -> Vec<f64> {
        let period = f64::from(self.stripe + self.gap);
        let half_stripe = f64::from(self.stripe / 2);
        let mut out = Vec::new();
        let mut at = 0.0;
        while at < end && period > 0.0 {
            if (at + half_stripe - middle).abs() > self.skip {
                out.push(at);
            }
            at += period;
        }
        out
    }
}

impl Marks for CrossingZebra {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        let stripe = f64::from(self.stripe);
        let (cx, cy) = (self.center.x, self.center.y);

        for x in self.horizontal_bands(ctx.width()) {
            painter.fill_rect(
                Rect::new(x, cy - self.half_length, x + stripe, cy + self.half_length),
                self.color,
            );
        }
        for y in self.vertical_bands() {
            painter.fill_rect(
                Rect::new(cx - self.half_length, y, cx + self.half_length, y + stripe),
                self.color,
            );
        }
        Ok(())
    }
}

/// Dashed bands running down both canvas diagonals.
///
/// A dash is lit where `(x ± y) / period` is even; each dash is `thickness` pixels wide.
#[derive(Clone, Debug)]
pub struct DiagonalZebra {
    pub period: u32,
    pub thickness: f64,
    /// Dashes stop above this y.
    pub bottom: f64,
    pub color: Rgba8,
}

impl DiagonalZebra {
    /// Inclusive x ranges of the lit dashes along `y = x` (and `y = W - x`).
    pub fn dash_columns(&self, width: f64) -> Vec<(f64, f64)> {
        // Along either diagonal `x ± y` equals `2x` (up to the constant `W`), so dashes are
        // `period / 2` columns long and start every `period` columns.
        let half = f64::from(self.period / 2);
        let step = f64::from(self.period);
        let mut out = Vec::new();
        let mut x0 = 0.0;
        while x0 < width && step > 0.0 {
            out.push((x0, (x0 + half - 1.0).min(width - 1.0)));
            x0 += step;
        }
        out
    }

    fn main_dash(&self, x0: f64, x1: f64) -> BezPath {
        let t = self.thickness;
        let mut path = BezPath::new();
        path.move_to((x0, x0));
        path.line_to((x0 + t, x0));
        path.line_to((x1 + t, x1));
        path.line_to((x1 + t, x1 + t));
        path.line_to((x1, x1 + t));
        path.line_to((x0, x0 + t));
        path.close_path();
        path
    }

    fn anti_dash(&self, x0: f64, x1: f64, width: f64) -> BezPath {
        let t = self.thickness;
        let (y0, y1) = (width - x0, width - x1);
        let mut path = BezPath::new();
        path.move_to((x1, y1));
        path.line_to((x1 + t, y1));
        path.line_to((x1 + t, y1 + t));
        path.line_to((x0 + t, y0 + t));
        path.line_to((x0, y0 + t));
        path.line_to((x0, y0));
        path.close_path();
        path
    }
}

impl Marks for DiagonalZebra {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        let width = ctx.width();
        let last_row = self.bottom - 1.0;

        for (x0, x1) in self.dash_columns(width) {
            // y = x
            let x1_main = x1.min(last_row);
            if x0 <= x1_main {
                painter.fill_path(&self.main_dash(x0, x1_main), self.color);
            }
            // y = W - x, kept above the bottom edge
            let x0_anti = x0.max(width - last_row);
            if x0_anti <= x1 {
                painter.fill_path(&self.anti_dash(x0_anti, x1, width), self.color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;
    use crate::foundation::rng::Rng64;
    use crate::palette::Palette;
    use crate::text::{FontBook, TextEngine};

    fn zebra() -> CrossingZebra {
        CrossingZebra {
            center: Point::new(1200.0, 1500.0),
            stripe: 36,
            gap: 18,
            skip: 180.0,
            half_length: 26.0,
            bottom: 2960.0,
            color: Rgba8::new(255, 255, 255, 50),
        }
    }

    #[test]
    fn bands_skip_the_intersection() {
        let z = zebra();
        let xs = z.horizontal_bands(2400.0);
        assert!(!xs.is_empty());
        assert!(xs.iter().all(|x| (x + 18.0 - 1200.0).abs() > 180.0));
        assert!(xs.iter().all(|x| (x % 54.0).abs() < f64::EPSILON));
    }

    #[test]
    fn vertical_bands_stop_above_bottom() {
        let z = zebra();
        let ys = z.vertical_bands();
        assert!(ys.iter().all(|&y| y < 2960.0));
        assert!(ys.iter().all(|y| (y + 18.0 - 1500.0).abs() > 180.0));
    }

    #[test]
    fn dashes_alternate_with_period() {
        let z = DiagonalZebra {
            period: 50,
            thickness: 4.0,
            bottom: 2975.0,
            color: Rgba8::new(255, 255, 255, 35),
        };
        let cols = z.dash_columns(200.0);
        assert_eq!(cols, vec![(0.0, 24.0), (50.0, 74.0), (100.0, 124.0), (150.0, 174.0)]);
        // Lit columns satisfy the phase rule on the main diagonal.
        for (x0, x1) in cols {
            for x in [x0, x1] {
                assert_eq!(((2.0 * x) as u32 / 50) % 2, 0);
            }
        }
    }

    #[test]
    fn both_corridors_are_striped_end_to_end() {
        let z = DiagonalZebra {
            period: 50,
            thickness: 4.0,
            bottom: 200.0,
            color: Rgba8::new(255, 255, 255, 255),
        };
        let size = Size::new(200, 200).unwrap();
        let palette = Palette::fluorescent();
        let mut rng = Rng64::new(1);
        let mut text = TextEngine::new(FontBook::new(None).with_system_fallback(false));
        let mut ctx = LayerCtx {
            size,
            palette: &palette,
            rng: &mut rng,
            text: &mut text,
        };
        let mut painter = Painter::new(size);
        z.paint(&mut painter, &mut ctx).unwrap();
        let layer = painter.finish().unwrap();
        let alpha = |x, y| layer.pixel(x, y).map(|px| px[3]).unwrap_or(0);

        // Lit dashes at both ends of y = x and of y = W - x.
        assert!(alpha(10, 10) > 0);
        assert!(alpha(160, 160) > 0);
        assert!(alpha(10, 190) > 0);
        assert!(alpha(160, 40) > 0);
        // Gaps between dashes stay clear.
        assert_eq!(alpha(35, 35), 0);
        assert_eq!(alpha(35, 165), 0);
    }
}
