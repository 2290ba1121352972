//! Vector drawing onto a transparent layer, rasterized with `vello_cpu`.

use kurbo::{Shape as _, Stroke};

use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Size};
use crate::foundation::error::PosterResult;
use crate::layer::Layer;
use crate::text::ShapedText;

const TOLERANCE: f64 = 0.1;

/// Line end style for strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

/// Records draw calls for one layer and rasterizes them on [`Painter::finish`].
///
/// Paints are straight-alpha colors; overlapping translucent shapes accumulate.
pub struct Painter {
    size: Size,
    ctx: vello_cpu::RenderContext,
}

impl Painter {
    pub fn new(size: Size) -> Self {
        // `Size` guarantees both edges fit in u16.
        let ctx = vello_cpu::RenderContext::new(size.width as u16, size.height as u16);
        Self { size, ctx }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if color.a == 0 || rect.is_zero_area() {
            return;
        }
        self.reset(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.reset(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn stroke_path(&mut self, path: &BezPath, width: f64, cap: LineCap, color: Rgba8) {
        if color.a == 0 || width <= 0.0 {
            return;
        }
        let style = match cap {
            LineCap::Butt => Stroke::new(width).with_caps(kurbo::Cap::Butt),
            LineCap::Round => Stroke::new(width).with_caps(kurbo::Cap::Round),
        };
        let outline = kurbo::stroke(path.iter(), &style, &kurbo::StrokeOpts::default(), TOLERANCE);
        self.fill_path(&outline, color);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new(center, radius).to_path(TOLERANCE);
        self.fill_path(&path, color);
    }

    /// Outline whose outer edge sits at `radius` and grows `width` pixels inward.
    pub fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgba8) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let mid = (radius - width / 2.0).max(width / 2.0);
        let path = kurbo::Circle::new(center, mid).to_path(TOLERANCE);
        self.stroke_path(&path, width, LineCap::Butt, color);
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        let path = kurbo::RoundedRect::from_rect(rect, radius).to_path(TOLERANCE);
        self.fill_path(&path, color);
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(&path, width, LineCap::Butt, color);
    }

    pub fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        self.stroke_path(&path, width, LineCap::Butt, color);
    }

    /// Paint shaped text with its layout origin (top-left of the line box) at `origin`.
    pub fn draw_text(&mut self, text: &ShapedText, origin: Point) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                if brush.a == 0 {
                    continue;
                }
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Rasterize everything drawn so far into a new layer.
    pub fn finish(mut self) -> PosterResult<Layer> {
        let mut pixmap = vello_cpu::Pixmap::new(self.size.width as u16, self.size.height as u16);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Layer::from_premul(self.size, pixmap.data_as_u8_slice().to_vec())
    }

    fn reset(&mut self, color: Rgba8) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
