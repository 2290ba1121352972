//! Translucent bottom title bar.

use crate::foundation::core::{Point, Rect, Rgb8, Rgba8};
use crate::foundation::error::PosterResult;
use crate::layers::labels::{BIG_SHOULDERS, GEIST_MONO, TEKTUR_REGULAR};
use crate::layers::{Labels, Marks, TextSpec};
use crate::paint::Painter;
use crate::palette::{NEAR_BLACK, WHITE};
use crate::pipeline::LayerCtx;

const DETAIL_OFFSETS: [f64; 5] = [30.0, 48.0, 72.0, 90.0, 108.0];
const SWATCH_PITCH: f64 = 26.0;

/// Bar fill, accent lines, title, subtitle, detail block, swatches and footer.
#[derive(Clone, Debug)]
pub struct TitleBar {
    /// Top edge of the bar.
    pub top: f64,
    pub accent: Rgb8,
    pub hairline: Rgb8,
    pub title: String,
    pub subtitle: String,
    /// Left edge of the right-hand detail block, measured from the right canvas edge.
    pub detail_inset: f64,
    /// Up to five detail lines, top to bottom.
    pub details: Vec<(String, Rgba8)>,
    pub footer: String,
}

impl TitleBar {
    fn labels(&self, width: f64) -> Labels {
        let top = self.top;
        let mut items = vec![
            TextSpec::at(
                self.title.clone(),
                BIG_SHOULDERS,
                100.0,
                (55.0, top + 28.0),
                self.accent.opaque(),
            ),
            TextSpec::at(
                self.subtitle.clone(),
                TEKTUR_REGULAR,
                26.0,
                (59.0, top + 132.0),
                WHITE.with_alpha(110),
            ),
        ];
        let x = width - self.detail_inset;
        for ((text, color), dy) in self.details.iter().zip(DETAIL_OFFSETS) {
            items.push(TextSpec::at(text.clone(), GEIST_MONO, 14.0, (x, top + dy), *color));
        }
        items.push(TextSpec::at(
            self.footer.clone(),
            GEIST_MONO,
            11.0,
            (59.0, top + 200.0),
            WHITE.with_alpha(50),
        ));
        Labels::new(items)
    }
}

impl Marks for TitleBar {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        let (w, h) = (ctx.width(), ctx.height());
        let top = self.top;

        painter.fill_rect(Rect::new(0.0, top, w, h), NEAR_BLACK.with_alpha(235));
        painter.stroke_line(
            Point::new(0.0, top),
            Point::new(w, top),
            4.0,
            self.accent.with_alpha(230),
        );
        painter.stroke_line(
            Point::new(0.0, top + 5.5),
            Point::new(w, top + 5.5),
            1.0,
            self.hairline.with_alpha(50),
        );

        self.labels(w).paint(painter, ctx)?;

        let swatch_top = top + 175.0;
        for (i, color) in ctx.palette.swatches().into_iter().enumerate() {
            let x = 59.0 + i as f64 * SWATCH_PITCH;
            painter.fill_rect(
                Rect::new(x, swatch_top, x + 18.0, swatch_top + 9.0),
                color.with_alpha(235),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{CYAN, HOT_PINK};

    #[test]
    fn detail_lines_use_fixed_offsets() {
        let bar = TitleBar {
            top: 2975.0,
            accent: HOT_PINK,
            hairline: CYAN,
            title: "FLUORESCENT PULSE".into(),
            subtitle: "SUB".into(),
            detail_inset: 310.0,
            details: vec![
                ("A".into(), CYAN.with_alpha(85)),
                ("B".into(), CYAN.with_alpha(85)),
            ],
            footer: "F".into(),
        };
        let labels = bar.labels(2400.0);
        assert_eq!(labels.items.len(), 5);
        assert_eq!(
            labels.items[3].anchor,
            crate::layers::Anchor::TopLeft(Point::new(2090.0, 3023.0))
        );
        assert_eq!(labels.items[0].color, HOT_PINK.opaque());
    }
}
