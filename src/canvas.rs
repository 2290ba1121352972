use crate::composite::{over_in_place, unpremultiply};
use crate::foundation::core::{Rgb8, Size};
use crate::foundation::error::{PosterError, PosterResult};
use crate::layer::Layer;

/// Running composite owned by the compositor driver.
///
/// Stored as premultiplied RGBA8. The background is opaque, so every pixel stays opaque
/// no matter what is composited on top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    data: Vec<u8>,
}

impl Canvas {
    /// Opaque canvas filled with `background`.
    pub fn new(size: Size, background: Rgb8) -> Self {
        let px = background.opaque().to_premul();
        let mut data = Vec::with_capacity(size.pixel_count() * 4);
        for _ in 0..size.pixel_count() {
            data.extend_from_slice(&px);
        }
        Self { size, data }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Source-over `layer` onto this canvas.
    ///
    /// A layer of any other size is a programming error and fails with
    /// [`PosterError::DimensionMismatch`]; nothing is cropped or stretched.
    pub fn composite_over(&mut self, layer: &Layer) -> PosterResult<()> {
        if layer.size() != self.size {
            return Err(PosterError::dimension_mismatch(
                self.size.as_tuple(),
                layer.size().as_tuple(),
            ));
        }
        over_in_place(&mut self.data, layer.as_bytes())
    }

    /// Straight RGB at `(x, y)`, if inside the canvas.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let [r, g, b, _] = unpremultiply([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]);
        Some(Rgb8::new(r, g, b))
    }

    /// Drop the alpha channel.
    pub fn flatten(&self) -> image::RgbImage {
        let width = self.size.width as usize;
        image::RgbImage::from_fn(self.size.width, self.size.height, |x, y| {
            let i = ((y as usize) * width + (x as usize)) * 4;
            let [r, g, b, _] = unpremultiply([
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ]);
            image::Rgb([r, g, b])
        })
    }

    /// Straight RGBA copy, used for animation frames.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let width = self.size.width as usize;
        image::RgbaImage::from_fn(self.size.width, self.size.height, |x, y| {
            let i = ((y as usize) * width + (x as usize)) * 4;
            image::Rgba(unpremultiply([
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Rgba8;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    #[test]
    fn new_canvas_is_opaque_background() {
        let c = Canvas::new(size(3, 2), Rgb8::new(8, 4, 18));
        assert!(c.as_bytes().chunks_exact(4).all(|p| p == [8, 4, 18, 255]));
        assert_eq!(c.rgb_at(2, 1), Some(Rgb8::new(8, 4, 18)));
        assert_eq!(c.rgb_at(3, 0), None);
    }

    #[test]
    fn translucent_layer_blends() {
        let s = size(1, 1);
        let mut c = Canvas::new(s, Rgb8::new(0, 0, 0));
        let layer = Layer::from_fn(s, |_, _| Rgba8::new(255, 255, 255, 50));
        c.composite_over(&layer).unwrap();
        assert_eq!(c.rgb_at(0, 0), Some(Rgb8::new(50, 50, 50)));
    }

    #[test]
    fn mismatched_layer_is_rejected() {
        let mut c = Canvas::new(size(4, 4), Rgb8::new(0, 0, 0));
        let err = c.composite_over(&Layer::transparent(size(4, 3))).unwrap_err();
        assert!(matches!(
            err,
            PosterError::DimensionMismatch {
                expected: (4, 4),
                got: (4, 3)
            }
        ));
    }

    #[test]
    fn flatten_keeps_rgb() {
        let c = Canvas::new(size(2, 2), Rgb8::new(1, 2, 3));
        let img = c.flatten();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 1).0, [1, 2, 3]);
    }
}
