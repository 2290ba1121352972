//! Edge darkening.

use crate::foundation::core::Rgba8;
use crate::foundation::error::PosterResult;
use crate::layer::Layer;
use crate::pipeline::{LayerCtx, LayerGenerator};

/// Black bands along the top, left and right edges and just above the title bar.
///
/// Band row `i` (0 at the edge) has alpha `trunc((depth - i) * step)`. Where bands overlap the
/// row farther from its edge wins.
#[derive(Clone, Debug)]
pub struct Vignette {
    pub depth: u32,
    pub step: f64,
    /// First row of the title bar; the lower band sits directly above it.
    pub bar_top: u32,
}

impl Vignette {
    pub fn band_alpha(&self, i: u32) -> u8 {
        if i >= self.depth {
            return 0;
        }
        (f64::from(self.depth - i) * self.step).clamp(0.0, 255.0) as u8
    }

    /// Largest band index covering `(x, y)` on a `width`-wide canvas.
    pub fn band_index(&self, x: u32, y: u32, width: u32) -> Option<u32> {
        let d = self.depth;
        let top = (y < d).then_some(y);
        let above_bar = self.bar_top.checked_sub(1 + y).filter(|&i| i < d);
        let left = (x < d).then_some(x);
        let right = width.checked_sub(1 + x).filter(|&i| i < d);
        [top, above_bar, left, right].into_iter().flatten().max()
    }
}

impl LayerGenerator for Vignette {
    fn name(&self) -> &str {
        "vignette"
    }

    fn generate(&self, ctx: &mut LayerCtx<'_>) -> PosterResult<Layer> {
        let width = ctx.size.width;
        Ok(Layer::from_fn(ctx.size, |x, y| {
            match self.band_index(x, y, width) {
                Some(i) => Rgba8::new(0, 0, 0, self.band_alpha(i)),
                None => Rgba8::TRANSPARENT,
            }
        }))
    }
}
