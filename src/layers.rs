//! Poster layer generators.
//!
//! Most layers are a [`LayerGroup`]: a named list of [`Marks`] painted in order onto one
//! transparent painter. Marks that need randomness draw from the shared source in the order
//! they are listed.

pub mod blocks;
pub mod dots;
pub mod labels;
pub mod lines;
pub mod mosaic;
pub mod rings;
pub mod signals;
pub mod stripes;
pub mod title_bar;
pub mod vignette;

pub use blocks::{AccentBlocks, BlockZone, ColumnSpan};
pub use dots::{Cluster, Flow, FlowDots};
pub use labels::{Anchor, Labels, TextSpec};
pub use lines::{Polyline, Strokes};
pub use mosaic::{Falloff, RadialMosaic, WaveMosaic, WaveSource, radial_falloff};
pub use rings::{Diamonds, Ring, Rings};
pub use signals::{SignalLight, Signals};
pub use stripes::{CrossingZebra, DiagonalZebra};
pub use title_bar::TitleBar;
pub use vignette::Vignette;

use crate::foundation::error::PosterResult;
use crate::layer::Layer;
use crate::paint::Painter;
use crate::pipeline::{LayerCtx, LayerGenerator};

/// Something that draws onto a shared layer painter.
pub trait Marks {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()>;
}

/// One layer built from several marks.
pub struct LayerGroup {
    name: &'static str,
    marks: Vec<Box<dyn Marks>>,
}

impl LayerGroup {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            marks: Vec::new(),
        }
    }

    pub fn with(mut self, marks: impl Marks + 'static) -> Self {
        self.marks.push(Box::new(marks));
        self
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

impl LayerGenerator for LayerGroup {
    fn name(&self) -> &str {
        self.name
    }

    fn generate(&self, ctx: &mut LayerCtx<'_>) -> PosterResult<Layer> {
        let mut painter = ctx.painter();
        for marks in &self.marks {
            marks.paint(&mut painter, ctx)?;
        }
        painter.finish()
    }
}

/// `randint(lo, hi)` bounds that stay valid when a small canvas inverts them.
pub(crate) fn span(lo: i32, hi: i32) -> Option<(i32, i32)> {
    (lo <= hi).then_some((lo, hi))
}
