//! The "done" badge: a white disc with a green ring and a round-capped checkmark.

use crate::foundation::core::{BezPath, Point, Rect, Rgb8, Rgba8};
use crate::paint::{LineCap, Painter};

pub const BG_TOP: Rgb8 = Rgb8::new(230, 255, 230);
pub const BG_BOTTOM: Rgb8 = Rgb8::new(180, 230, 180);
pub const CHECK_GREEN: Rgb8 = Rgb8::new(34, 170, 60);
pub const BADGE_WHITE: Rgb8 = Rgb8::new(255, 255, 255);
pub const SPARKLE_GOLD: Rgb8 = Rgb8::new(255, 215, 0);

/// Badge radius at scale 1, in 128 px units.
pub const BADGE_RADIUS: f64 = 38.0;

/// Four-pointed sparkle drawn as a plus sign.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    pub at: Point,
    /// Arm half-length in pixels.
    pub size: f64,
}

/// Everything needed to draw one frame of the badge.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgePose {
    pub center: Point,
    pub radius: f64,
    pub ring_width: f64,
    /// Checkmark scale; already multiplied by the canvas unit.
    pub check_scale: f64,
    pub sparkles: Vec<Sparkle>,
}

/// Checkmark corners: left tip, bottom, right tip.
pub fn check_points(center: Point, s: f64) -> [Point; 3] {
    [
        Point::new(center.x - 18.0 * s, center.y - 6.0 * s),
        Point::new(center.x - 2.0 * s, center.y + 8.0 * s),
        Point::new(center.x + 20.0 * s, center.y - 18.0 * s),
    ]
}

pub fn check_width(s: f64) -> f64 {
    (8.0 * s).trunc().max(3.0)
}

/// Vertical two-color gradient, truncating each channel.
pub fn gradient_row(y: u32, height: u32) -> Rgb8 {
    let ratio = f64::from(y) / f64::from(height);
    let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - ratio) + f64::from(b) * ratio) as u8;
    Rgb8::new(
        mix(BG_TOP.r, BG_BOTTOM.r),
        mix(BG_TOP.g, BG_BOTTOM.g),
        mix(BG_TOP.b, BG_BOTTOM.b),
    )
}

impl BadgePose {
    pub fn paint(&self, painter: &mut Painter) {
        painter.fill_circle(self.center, self.radius, BADGE_WHITE.opaque());
        painter.stroke_circle(
            self.center,
            self.radius,
            self.ring_width,
            CHECK_GREEN.opaque(),
        );

        let [left, bottom, right] = check_points(self.center, self.check_scale);
        let mut path = BezPath::new();
        path.move_to(left);
        path.line_to(bottom);
        path.line_to(right);
        painter.stroke_path(
            &path,
            check_width(self.check_scale),
            LineCap::Round,
            CHECK_GREEN.opaque(),
        );

        let gold: Rgba8 = SPARKLE_GOLD.opaque();
        for sparkle in &self.sparkles {
            let Sparkle { at, size } = *sparkle;
            painter.fill_rect(
                Rect::new(at.x - 1.0, at.y - size, at.x + 1.0, at.y + size),
                gold,
            );
            painter.fill_rect(
                Rect::new(at.x - size, at.y - 1.0, at.x + size, at.y + 1.0),
                gold,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Size;

    #[test]
    fn checkmark_bottom_sits_below_center() {
        let [l, b, r] = check_points(Point::new(64.0, 68.0), 1.0);
        assert_eq!(b, Point::new(62.0, 76.0));
        assert!(l.x < b.x && b.x < r.x);
        assert!(r.y < l.y);
        assert_eq!(check_width(0.3), 3.0);
        assert_eq!(check_width(1.0), 8.0);
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        assert_eq!(gradient_row(0, 128), BG_TOP);
        let last = gradient_row(127, 128);
        assert!(last.g < BG_TOP.g && last.g >= BG_BOTTOM.g);
    }

    #[test]
    fn badge_paints_green_ring_and_white_disc() {
        let pose = BadgePose {
            center: Point::new(64.0, 68.0),
            radius: 38.0,
            ring_width: 3.0,
            check_scale: 1.0,
            sparkles: vec![Sparkle {
                at: Point::new(19.0, 33.0),
                size: 4.0,
            }],
        };
        let mut painter = Painter::new(Size::new(128, 128).unwrap());
        pose.paint(&mut painter);
        let layer = painter.finish().unwrap();

        // Ring, one pixel inside the outer edge on the left.
        let ring = layer.pixel(64 - 37, 68).unwrap();
        assert_eq!(ring[3], 255);
        assert!(ring[1] > ring[0]);
        // Disc interior away from the checkmark.
        assert_eq!(layer.pixel(64, 40).unwrap(), [255, 255, 255, 255]);
        // Sparkle center.
        assert_eq!(layer.pixel(19, 33).unwrap()[3], 255);
        assert_eq!(layer.pixel(0, 0).unwrap(), [0, 0, 0, 0]);
    }
}
