use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{PosterError, PosterResult};

/// One transparent-background raster produced by a single generator call.
///
/// Pixels are premultiplied RGBA8 in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    size: Size,
    data: Vec<u8>,
}

impl Layer {
    /// Fully transparent layer.
    pub fn transparent(size: Size) -> Self {
        Self {
            size,
            data: vec![0; size.pixel_count() * 4],
        }
    }

    /// Wrap an existing premultiplied buffer of exactly `size` pixels.
    pub fn from_premul(size: Size, data: Vec<u8>) -> PosterResult<Self> {
        if data.len() != size.pixel_count() * 4 {
            return Err(PosterError::validation(format!(
                "layer buffer holds {} bytes, expected {} for {}x{}",
                data.len(),
                size.pixel_count() * 4,
                size.width,
                size.height
            )));
        }
        Ok(Self { size, data })
    }

    /// Build a layer from a per-pixel straight-alpha color function.
    pub fn from_fn(size: Size, mut f: impl FnMut(u32, u32) -> Rgba8) -> Self {
        let mut data = Vec::with_capacity(size.pixel_count() * 4);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend_from_slice(&f(x, y).to_premul());
            }
        }
        Self { size, data }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied pixel at `(x, y)`, if inside the layer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_premul_checks_length() {
        let size = Size::new(2, 2).unwrap();
        assert!(Layer::from_premul(size, vec![0; 16]).is_ok());
        assert!(Layer::from_premul(size, vec![0; 12]).is_err());
    }

    #[test]
    fn from_fn_premultiplies() {
        let size = Size::new(2, 1).unwrap();
        let layer = Layer::from_fn(size, |x, _| {
            if x == 0 {
                Rgba8::new(255, 255, 255, 128)
            } else {
                Rgba8::TRANSPARENT
            }
        });
        assert_eq!(layer.pixel(0, 0), Some([128, 128, 128, 128]));
        assert_eq!(layer.pixel(1, 0), Some([0, 0, 0, 0]));
        assert_eq!(layer.pixel(2, 0), None);
        assert!(!layer.is_fully_transparent());
        assert!(Layer::transparent(size).is_fully_transparent());
    }
}
