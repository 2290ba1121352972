//! Text marks: watermarks, letter stacks, fragments and indices.

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::PosterResult;
use crate::layers::Marks;
use crate::paint::Painter;
use crate::pipeline::LayerCtx;

pub const BIG_SHOULDERS: &str = "BigShoulders-Bold.ttf";
pub const ERICA_ONE: &str = "EricaOne-Regular.ttf";
pub const TEKTUR_MEDIUM: &str = "Tektur-Medium.ttf";
pub const TEKTUR_REGULAR: &str = "Tektur-Regular.ttf";
pub const GEIST_MONO: &str = "GeistMono-Regular.ttf";
pub const PIXELIFY_SANS: &str = "PixelifySans-Medium.ttf";

/// Where a string is placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Top-left corner of the line box.
    TopLeft(Point),
    /// Measured bounds centered on the point, then moved down by `nudge_y`.
    Centered { center: Point, nudge_y: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub font: &'static str,
    pub size: f32,
    pub anchor: Anchor,
    pub color: Rgba8,
}

impl TextSpec {
    pub fn at(
        text: impl Into<String>,
        font: &'static str,
        size: f32,
        (x, y): (f64, f64),
        color: Rgba8,
    ) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            anchor: Anchor::TopLeft(Point::new(x, y)),
            color,
        }
    }

    pub fn centered(
        text: impl Into<String>,
        font: &'static str,
        size: f32,
        center: Point,
        nudge_y: f64,
        color: Rgba8,
    ) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            anchor: Anchor::Centered { center, nudge_y },
            color,
        }
    }

    /// One spec per character, stacked downward from `(x, y)` every `pitch` pixels.
    pub fn letter_stack(
        word: &str,
        font: &'static str,
        size: f32,
        (x, y): (f64, f64),
        pitch: f64,
        color: Rgba8,
    ) -> Vec<Self> {
        word.chars()
            .enumerate()
            .map(|(i, ch)| Self::at(ch, font, size, (x, y + i as f64 * pitch), color))
            .collect()
    }
}

/// Origin for a `width` x `height` box placed by `anchor`.
pub fn place(anchor: Anchor, width: f64, height: f64) -> Point {
    match anchor {
        Anchor::TopLeft(p) => p,
        Anchor::Centered { center, nudge_y } => Point::new(
            center.x - (width / 2.0).trunc(),
            center.y - (height / 2.0).trunc() + nudge_y,
        ),
    }
}

/// A list of strings drawn in order.
#[derive(Clone, Debug, Default)]
pub struct Labels {
    pub items: Vec<TextSpec>,
}

impl Labels {
    pub fn new(items: Vec<TextSpec>) -> Self {
        Self { items }
    }
}

impl Marks for Labels {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        for item in &self.items {
            if item.color.a == 0 || item.text.is_empty() {
                continue;
            }
            let Some(shaped) = ctx
                .text
                .shape(item.font, &item.text, item.size, item.color)?
            else {
                tracing::debug!(text = %item.text, font = item.font, "label skipped, no font");
                continue;
            };
            let origin = place(item.anchor, shaped.width(), shaped.height());
            painter.draw_text(&shaped, origin);
        }
        Ok(())
    }
}
