//! Animated GIF sink: shared palette quantization, duplicate merging, infinite loop.

use std::collections::HashMap;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::fingerprint;
use crate::sink::{SavedImage, ensure_parent_dir};

/// A frame shown for `repeats` ticks of the base frame delay.
#[derive(Clone, Debug, PartialEq)]
pub struct HeldFrame {
    pub image: RgbaImage,
    pub repeats: u32,
}

/// The `colors` most frequent opaque colors across all frames, most frequent first.
pub fn popular_palette(frames: &[RgbaImage], colors: usize) -> Vec<[u8; 3]> {
    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    for frame in frames {
        for px in frame.pixels() {
            let [r, g, b, _] = px.0;
            *counts.entry([r, g, b]).or_default() += 1;
        }
    }
    let mut ranked: Vec<([u8; 3], u32)> = counts.into_iter().collect();
    // Ties break on the color value so the palette does not depend on hash order.
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(colors).map(|(c, _)| c).collect()
}

fn nearest(palette: &[[u8; 3]], c: [u8; 3]) -> [u8; 3] {
    let dist = |p: &[u8; 3]| {
        p.iter()
            .zip(c)
            .map(|(&a, b)| {
                let d = i32::from(a) - i32::from(b);
                d * d
            })
            .sum::<i32>()
    };
    palette.iter().copied().min_by_key(dist).unwrap_or(c)
}

/// Snap every pixel to its nearest palette entry.
pub fn quantize(frames: &mut [RgbaImage], palette: &[[u8; 3]]) {
    let mut memo: HashMap<[u8; 3], [u8; 3]> = HashMap::new();
    for frame in frames.iter_mut() {
        for px in frame.pixels_mut() {
            let [r, g, b, _] = px.0;
            let [r, g, b] = *memo
                .entry([r, g, b])
                .or_insert_with(|| nearest(palette, [r, g, b]));
            px.0 = [r, g, b, 255];
        }
    }
}

/// Collapse runs of identical frames into one frame with a longer delay.
pub fn merge_duplicates(frames: Vec<RgbaImage>) -> Vec<HeldFrame> {
    let mut out: Vec<HeldFrame> = Vec::with_capacity(frames.len());
    for image in frames {
        match out.last_mut() {
            Some(last) if last.image == image => last.repeats += 1,
            _ => out.push(HeldFrame { image, repeats: 1 }),
        }
    }
    out
}

fn encode_error(e: image::ImageError) -> PosterError {
    PosterError::encode(format!("gif: {e}"))
}

/// Encode `frames` as a looping GIF at `fps`.
pub fn encode(frames: Vec<RgbaImage>, fps: u32, colors: usize) -> PosterResult<(usize, Vec<u8>)> {
    if frames.is_empty() {
        return Err(PosterError::validation("gif needs at least one frame"));
    }
    if fps == 0 {
        return Err(PosterError::validation("gif fps must be > 0"));
    }
    let mut frames = frames;
    let palette = popular_palette(&frames, colors);
    quantize(&mut frames, &palette);
    let held = merge_duplicates(frames);
    let count = held.len();

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, 10);
        encoder.set_repeat(Repeat::Infinite).map_err(encode_error)?;
        for HeldFrame { image, repeats } in held {
            let delay = Delay::from_numer_denom_ms(1000 * repeats, fps);
            encoder
                .encode_frame(Frame::from_parts(image, 0, 0, delay))
                .map_err(encode_error)?;
        }
    }
    tracing::debug!(frames = count, palette = palette.len(), "gif encoded");
    Ok((count, bytes))
}

#[tracing::instrument(skip(frames), fields(path = %path.display()))]
pub fn write_gif(
    frames: Vec<RgbaImage>,
    fps: u32,
    colors: usize,
    path: &Path,
) -> PosterResult<SavedImage> {
    let (width, height) = frames.first().map_or((0, 0), |f| f.dimensions());
    let (count, bytes) = encode(frames, fps, colors)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, &bytes).map_err(|e| PosterError::io(path, e))?;

    let digest = fingerprint(&bytes);
    tracing::info!(frames = count, fingerprint = %format!("{digest:016x}"), "gif written");
    Ok(SavedImage {
        path: path.to_path_buf(),
        width,
        height,
        fingerprint: digest,
    })
}
