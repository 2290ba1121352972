//! The two poster variants and their rendering entry point.

pub mod crossing;
pub mod wave;

use std::path::Path;

use crate::canvas::Canvas;
use crate::config::PosterConfig;
use crate::foundation::core::Size;
use crate::foundation::error::{PosterError, PosterResult};
use crate::palette::Palette;
use crate::pipeline::Compositor;
use crate::sink::{self, SavedImage};
use crate::text::{FontBook, TextEngine};

/// Smallest canvas the poster layouts are defined for.
pub const MIN_WIDTH: u32 = 400;
pub const MIN_HEIGHT: u32 = 600;

/// Height of the bottom title bar.
pub const TITLE_BAR_HEIGHT: u32 = 225;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PosterVariant {
    /// Radial mosaic around a street crossing (variant A).
    #[default]
    Crossing,
    /// Three-source wave interference with diagonal corridors (variant B).
    Wave,
}

impl PosterVariant {
    pub fn default_seed(self) -> u64 {
        match self {
            Self::Crossing => 1997,
            Self::Wave => 2003,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crossing => "crossing",
            Self::Wave => "wave",
        }
    }
}

impl std::fmt::Display for PosterVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a canvas is large enough for the poster layouts.
pub fn validate_size(size: Size) -> PosterResult<()> {
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        return Err(PosterError::validation(format!(
            "poster canvas must be at least {MIN_WIDTH}x{MIN_HEIGHT}, got {}x{}",
            size.width, size.height
        )));
    }
    Ok(())
}

/// Assemble the ordered layer list for `variant`.
pub fn compositor(variant: PosterVariant, size: Size, seed: u64) -> PosterResult<Compositor> {
    validate_size(size)?;
    let palette = Palette::fluorescent();
    let mut comp = Compositor::new(size, palette.background, seed).with_palette(palette)?;
    match variant {
        PosterVariant::Crossing => crossing::push_layers(&mut comp),
        PosterVariant::Wave => wave::push_layers(&mut comp),
    }
    Ok(comp)
}

/// Render a poster to a canvas.
#[tracing::instrument(skip_all, fields(variant = %config.variant))]
pub fn render(config: &PosterConfig, text: &mut TextEngine) -> PosterResult<Canvas> {
    let comp = compositor(config.variant, config.size()?, config.effective_seed())?;
    tracing::debug!(layers = ?comp.layer_names(), "poster layers");
    comp.render(text)
}

/// Render a poster and write it as PNG.
pub fn generate(config: &PosterConfig, out: &Path) -> PosterResult<SavedImage> {
    let book = FontBook::new(config.fonts_dir.clone());
    let mut text = TextEngine::new(book);
    let canvas = render(config, &mut text)?;
    sink::write_png(&canvas, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_variants_have_thirteen_layers() {
        let size = Size::new(2400, 3200).unwrap();
        for variant in [PosterVariant::Crossing, PosterVariant::Wave] {
            let comp = compositor(variant, size, variant.default_seed()).unwrap();
            assert_eq!(comp.layer_names().len(), 13, "{variant}");
            assert_eq!(comp.layer_names().last(), Some(&"vignette"));
        }
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let size = Size::new(200, 200).unwrap();
        let Err(err) = compositor(PosterVariant::Wave, size, 1) else {
            panic!("200x200 poster canvas was accepted");
        };
        assert!(matches!(err, PosterError::Validation(_)));
    }

    #[test]
    fn variant_names_round_trip_through_serde() {
        let v: PosterVariant = serde_json::from_str("\"wave\"").unwrap();
        assert_eq!(v, PosterVariant::Wave);
        assert_eq!(serde_json::to_string(&PosterVariant::Crossing).unwrap(), "\"crossing\"");
    }
}
