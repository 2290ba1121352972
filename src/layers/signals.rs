//! Traffic-light housings with one lit lamp.

use crate::foundation::core::{Point, Rect, Rgb8, Rgba8};
use crate::foundation::error::PosterResult;
use crate::layers::Marks;
use crate::paint::Painter;
use crate::palette::{ACID_YELLOW, HOUSING_GRAY, NEON_GREEN, SIGNAL_RED};
use crate::pipeline::LayerCtx;

const HOUSING_W: f64 = 28.0;
const HOUSING_H: f64 = 76.0;
const LAMP_PITCH: f64 = 22.0;
const LAMP_RADIUS: f64 = 9.0;
const LAMPS: [Rgb8; 3] = [SIGNAL_RED, ACID_YELLOW, NEON_GREEN];

/// Top-left corner of a housing plus the index (red, yellow, green) of its lit lamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalLight {
    pub x: f64,
    pub y: f64,
    pub lit: usize,
}

impl SignalLight {
    pub const fn new(x: f64, y: f64, lit: usize) -> Self {
        Self { x, y, lit }
    }

    pub fn lamp_center(&self, i: usize) -> Point {
        Point::new(
            self.x + HOUSING_W / 2.0,
            self.y + 6.0 + i as f64 * LAMP_PITCH + LAMP_RADIUS,
        )
    }
}

#[derive(Clone, Debug)]
pub struct Signals {
    pub lights: Vec<SignalLight>,
    /// Housings reaching this y or lower are skipped.
    pub bottom: Option<f64>,
}

impl Signals {
    pub fn visible(&self) -> impl Iterator<Item = &SignalLight> {
        self.lights
            .iter()
            .filter(|l| self.bottom.is_none_or(|b| l.y + HOUSING_H < b))
    }
}

impl Marks for Signals {
    fn paint(&self, painter: &mut Painter, _ctx: &mut LayerCtx<'_>) -> PosterResult<()> {
        for light in self.visible() {
            painter.fill_rounded_rect(
                Rect::new(light.x, light.y, light.x + HOUSING_W, light.y + HOUSING_H),
                5.0,
                HOUSING_GRAY.with_alpha(200),
            );
            for i in 0..LAMPS.len() {
                if let Some(color) = lamp_color(i, i == light.lit) {
                    painter.fill_circle(light.lamp_center(i), LAMP_RADIUS, color);
                }
            }
        }
        Ok(())
    }
}

/// Lamp color for `index`, if it names one of the three lamps.
pub fn lamp_color(index: usize, lit: bool) -> Option<Rgba8> {
    let base = LAMPS.get(index).copied()?;
    Some(base.with_alpha(if lit { 230 } else { 40 }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lamps_are_stacked_inside_the_housing() {
        let l = SignalLight::new(100.0, 200.0, 1);
        assert_eq!(l.lamp_center(0), Point::new(114.0, 215.0));
        assert_eq!(l.lamp_center(2), Point::new(114.0, 259.0));
        assert!(l.lamp_center(2).y + LAMP_RADIUS <= 200.0 + HOUSING_H);
    }

    #[test]
    fn housings_below_the_bar_are_skipped() {
        let s = Signals {
            lights: vec![
                SignalLight::new(10.0, 100.0, 0),
                SignalLight::new(10.0, 2900.0, 2),
            ],
            bottom: Some(2975.0),
        };
        assert_eq!(s.visible().count(), 1);
    }

    #[test]
    fn lamp_color_dims_unlit_lamps() {
        assert_eq!(lamp_color(0, true).map(|c| c.a), Some(230));
        assert_eq!(lamp_color(2, false).map(|c| c.a), Some(40));
        assert_eq!(lamp_color(3, true), None);
    }
}
