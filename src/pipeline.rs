use std::time::Instant;

use crate::canvas::Canvas;
use crate::foundation::core::{Rgb8, Size};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::rng::Rng64;
use crate::layer::Layer;
use crate::paint::Painter;
use crate::palette::Palette;
use crate::text::TextEngine;

/// Everything a generator may read or draw from.
///
/// The random source is shared by every generator of a run; draws happen in list order.
pub struct LayerCtx<'a> {
    pub size: Size,
    pub palette: &'a Palette,
    pub rng: &'a mut Rng64,
    pub text: &'a mut TextEngine,
}

impl LayerCtx<'_> {
    /// Fresh transparent painter matching the canvas.
    pub fn painter(&self) -> Painter {
        Painter::new(self.size)
    }

    pub fn width(&self) -> f64 {
        f64::from(self.size.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.size.height)
    }
}

/// One visual concern of a poster, rendered into its own transparent layer.
pub trait LayerGenerator {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn generate(&self, ctx: &mut LayerCtx<'_>) -> PosterResult<Layer>;
}

/// Ordered list of generators folded onto an opaque canvas.
pub struct Compositor {
    size: Size,
    background: Rgb8,
    seed: u64,
    palette: Palette,
    steps: Vec<Box<dyn LayerGenerator>>,
}

impl Compositor {
    pub fn new(size: Size, background: Rgb8, seed: u64) -> Self {
        Self {
            size,
            background,
            seed,
            palette: Palette::fluorescent(),
            steps: Vec::new(),
        }
    }

    /// Swap in another palette. Every color set must hold at least one color.
    pub fn with_palette(mut self, palette: Palette) -> PosterResult<Self> {
        palette.validate()?;
        self.palette = palette;
        Ok(self)
    }

    /// Append a generator; it will be composited above every earlier one.
    pub fn push(&mut self, step: impl LayerGenerator + 'static) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every generator in order and return the final canvas.
    #[tracing::instrument(
        skip_all,
        fields(
            width = self.size.width,
            height = self.size.height,
            seed = self.seed,
            layers = self.steps.len()
        )
    )]
    pub fn render(&self, text: &mut TextEngine) -> PosterResult<Canvas> {
        let mut canvas = Canvas::new(self.size, self.background);
        let mut rng = Rng64::new(self.seed);

        for step in &self.steps {
            let started = Instant::now();
            let mut ctx = LayerCtx {
                size: self.size,
                palette: &self.palette,
                rng: &mut rng,
                text: &mut *text,
            };
            let layer = step.generate(&mut ctx)?;
            if layer.size() != self.size {
                tracing::error!(layer = step.name(), "generator produced a mis-sized layer");
                return Err(PosterError::dimension_mismatch(
                    self.size.as_tuple(),
                    layer.size().as_tuple(),
                ));
            }
            canvas.composite_over(&layer)?;
            tracing::debug!(
                layer = step.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "composited layer"
            );
        }

        Ok(canvas)
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("size", &self.size)
            .field("seed", &self.seed)
            .field("layers", &self.layer_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Rgba8;
    use crate::text::FontBook;

    struct Solid(Rgba8);

    impl LayerGenerator for Solid {
        fn name(&self) -> &str {
            "solid"
        }

        fn generate(&self, ctx: &mut LayerCtx<'_>) -> PosterResult<Layer> {
            let c = self.0;
            Ok(Layer::from_fn(ctx.size, |_, _| c))
        }
    }

    struct WrongSize;

    impl LayerGenerator for WrongSize {
        fn name(&self) -> &str {
            "wrong-size"
        }

        fn generate(&self, ctx: &mut LayerCtx<'_>) -> PosterResult<Layer> {
            let s = Size::new(ctx.size.width + 1, ctx.size.height)?;
            Ok(Layer::transparent(s))
        }
    }

    fn engine() -> TextEngine {
        TextEngine::new(FontBook::new(None).with_system_fallback(false))
    }

    #[test]
    fn later_layers_land_on_top() {
        let size = Size::new(4, 4).unwrap();
        let mut comp = Compositor::new(size, Rgb8::new(0, 0, 0), 1);
        comp.push(Solid(Rgba8::new(255, 0, 0, 255)))
            .push(Solid(Rgba8::new(0, 0, 255, 255)));
        let canvas = comp.render(&mut engine()).unwrap();
        assert_eq!(canvas.rgb_at(0, 0), Some(Rgb8::new(0, 0, 255)));
        assert_eq!(comp.layer_names(), vec!["solid", "solid"]);
    }

    #[test]
    fn mis_sized_layer_aborts_the_run() {
        let size = Size::new(4, 4).unwrap();
        let mut comp = Compositor::new(size, Rgb8::new(0, 0, 0), 1);
        comp.push(WrongSize);
        let err = comp.render(&mut engine()).unwrap_err();
        assert!(matches!(err, PosterError::DimensionMismatch { .. }));
    }

    #[test]
    fn palette_with_an_empty_set_is_refused() {
        let size = Size::new(4, 4).unwrap();
        let mut palette = Palette::fluorescent();
        palette.darks.clear();
        let err = Compositor::new(size, Rgb8::new(0, 0, 0), 1)
            .with_palette(palette)
            .unwrap_err();
        assert!(matches!(err, PosterError::Validation(_)));
    }

    #[test]
    fn debug_lists_layers_in_order() {
        let size = Size::new(4, 4).unwrap();
        let mut comp = Compositor::new(size, Rgb8::new(0, 0, 0), 7);
        comp.push(Solid(Rgba8::new(1, 2, 3, 255))).push(WrongSize);
        let shown = format!("{comp:?}");
        assert!(shown.contains("seed: 7"), "{shown}");
        assert!(shown.contains(r#"["solid", "wrong-size"]"#), "{shown}");
    }
}
