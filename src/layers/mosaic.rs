//! Background mosaics: the canvas is tiled into square cells, each filled with one color.

use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::PosterResult;
use crate::foundation::rng::Rng64;
use crate::layers::Marks;
use crate::paint::Painter;
use crate::palette::Palette;
use crate::pipeline::LayerCtx;

/// Brightness and dark-substitution probability for one falloff band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    pub bright: f64,
    pub dark_p: f64,
}

/// Stepwise falloff of the radial mosaic.
///
/// Bands (by normalized distance): `[0, .10)`, `[.10, .25)`, `[.25, .45)`, `[.45, .65)`,
/// `[.65, 1]`. Brightness ramps linearly inside the second and third bands and is constant
/// elsewhere; the dark probability is constant per band and never decreases outward.
pub fn radial_falloff(norm: f64) -> Falloff {
    if norm < 0.1 {
        Falloff {
            bright: 1.0,
            dark_p: 0.01,
        }
    } else if norm < 0.25 {
        Falloff {
            bright: 0.92 - (norm - 0.1) * 3.0,
            dark_p: 0.08,
        }
    } else if norm < 0.45 {
        Falloff {
            bright: 0.65 - (norm - 0.25) * 1.8,
            dark_p: 0.25,
        }
    } else if norm < 0.65 {
        Falloff {
            bright: 0.30,
            dark_p: 0.48,
        }
    } else {
        Falloff {
            bright: 0.10,
            dark_p: 0.78,
        }
    }
}

/// Scale each channel by `bright`, add a per-channel jitter in `[-jitter, jitter]`, clamp.
fn shade(color: Rgb8, bright: f64, jitter: i32, rng: &mut Rng64) -> Rgb8 {
    let [r, g, b] = color.channels();
    let mut out = [0u8; 3];
    for (o, c) in out.iter_mut().zip([r, g, b]) {
        let v = (f64::from(c) * bright + f64::from(rng.randint(-jitter, jitter))).trunc();
        *o = v.clamp(0.0, 255.0) as u8;
    }
    Rgb8::new(out[0], out[1], out[2])
}

/// Radial sector mosaic around a focal center, split by two perpendicular corridors.
#[derive(Clone, Debug)]
pub struct RadialMosaic {
    pub cell: u32,
    pub center: Point,
    /// Distance at which `norm` saturates to 1.
    pub reach: f64,
    /// Cells whose center is closer than this to either corridor axis get the background.
    pub corridor_half: f64,
}

impl RadialMosaic {
    /// Sector index (0..sectors) of a cell center, counted from angle -π.
    pub fn sector_of(&self, p: Point, sectors: usize) -> usize {
        let angle = (p.y - self.center.y).atan2(p.x - self.center.x);
        let s = ((angle + std::f64::consts::PI) / std::f64::consts::TAU * sectors as f64) as usize;
        s % sectors
    }

    pub fn in_corridor(&self, p: Point) -> bool {
        (p.y - self.center.y).abs() < self.corridor_half
            || (p.x - self.center.x).abs() < self.corridor_half
    }

    fn cell_color(&self, p: Point, palette: &Palette, rng: &mut Rng64) -> Rgb8 {
        if self.in_corridor(p) {
            return palette.background;
        }
        let norm = (p.distance(self.center) / self.reach).min(1.0);
        let base = palette.sectors[self.sector_of(p, palette.sectors.len())];
        let Falloff { bright, dark_p } = radial_falloff(norm);

        if rng.chance(dark_p) {
            rng.choose(&palette.darks)
        } else {
            let mix = rng.choose(&palette.brights);
            let t = rng.uniform(0.0, 0.3);
            shade(base.blend(mix, t), bright, 6, rng)
        }
    }
}

impl Marks for RadialMosaic {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        let cell = self.cell.max(1);
        let half = f64::from(cell / 2);

        for ry in (0..ctx.size.height).step_by(cell as usize) {
            for rx in (0..ctx.size.width).step_by(cell as usize) {
                let (x0, y0) = (f64::from(rx), f64::from(ry));
                let color = self.cell_color(Point::new(x0 + half, y0 + half), ctx.palette, ctx.rng);
                painter.fill_rect(
                    Rect::new(x0, y0, x0 + f64::from(cell), y0 + f64::from(cell)),
                    color.opaque(),
                );
            }
        }

        Ok(())
    }
}

/// A point emitter whose distance rings drive the interference mosaic.
#[derive(Clone, Debug)]
pub struct WaveSource {
    pub at: Point,
    pub colors: [Rgb8; 3],
}

/// `(sin(2π·d/λ) + 1) / 2` for the distance `d` between `p` and `source`.
pub fn wave_value(p: Point, source: Point, wavelength: f64) -> f64 {
    let d = p.distance(source);
    ((d / wavelength * std::f64::consts::TAU).sin() + 1.0) / 2.0
}

/// Three-source interference mosaic with two diagonal corridors.
#[derive(Clone, Debug)]
pub struct WaveMosaic {
    pub cell: u32,
    /// Rows at or below this y are left transparent.
    pub bottom: u32,
    pub sources: Vec<WaveSource>,
    pub wavelength: f64,
    /// Perpendicular half-width of each diagonal corridor.
    pub corridor_half: f64,
    pub reach: f64,
    pub max_dark_p: f64,
}

impl WaveMosaic {
    /// Linear dark-cell probability: 0 at a source, `max_dark_p` at `reach` and beyond.
    pub fn dark_probability(&self, nearest: f64) -> f64 {
        (nearest / self.reach).min(1.0) * self.max_dark_p
    }

    pub fn in_corridor(&self, p: Point, width: f64) -> bool {
        let d1 = (p.y - p.x).abs() / std::f64::consts::SQRT_2;
        let d2 = (p.y - (width - p.x)).abs() / std::f64::consts::SQRT_2;
        d1 < self.corridor_half || d2 < self.corridor_half
    }

    fn cell_color(&self, p: Point, width: f64, palette: &Palette, rng: &mut Rng64) -> Rgb8 {
        if self.sources.is_empty() || self.in_corridor(p, width) {
            return palette.background;
        }

        let interference = self
            .sources
            .iter()
            .map(|s| wave_value(p, s.at, self.wavelength))
            .sum::<f64>()
            / self.sources.len() as f64;
        let bright = 0.3 + interference * 0.7;

        let dists: Vec<f64> = self.sources.iter().map(|s| p.distance(s.at)).collect();
        let mut order: Vec<usize> = (0..dists.len()).collect();
        order.sort_by(|&a, &b| dists[a].total_cmp(&dists[b]));
        let nearest = order[0];
        let second = order.get(1).copied().unwrap_or(nearest);
        let ratio = dists[nearest] / (dists[nearest] + dists[second] + 1.0);

        if rng.chance(self.dark_probability(dists[nearest])) {
            return rng.choose(&palette.darks);
        }

        let mut base = rng.choose(&self.sources[nearest].colors);
        if ratio > 0.35 {
            let secondary = rng.choose(&self.sources[second].colors);
            base = base.blend(secondary, rng.uniform(0.1, 0.4));
        }
        let mix = rng.choose(&palette.brights);
        let t = rng.uniform(0.0, 0.15);
        shade(base.blend(mix, t), bright, 8, rng)
    }
}

impl Marks for WaveMosaic {
    fn paint(&self, painter: &mut Painter, ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        let cell = self.cell.max(1);
        let half = f64::from(cell / 2);
        let width = ctx.width();
        let bottom = self.bottom.min(ctx.size.height);

        for ry in (0..bottom).step_by(cell as usize) {
            for rx in (0..ctx.size.width).step_by(cell as usize) {
                let (x0, y0) = (f64::from(rx), f64::from(ry));
                let p = Point::new(x0 + half, y0 + half);
                let color = self.cell_color(p, width, ctx.palette, ctx.rng);
                painter.fill_rect(
                    Rect::new(x0, y0, x0 + f64::from(cell), y0 + f64::from(cell)),
                    color.opaque(),
                );
            }
        }

        Ok(())
    }
}
