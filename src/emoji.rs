//! Animated "done" checkmark emoji.
//!
//! The badge drops in from above the frame with a bounce while growing, then settles with a
//! short pulse and a burst of sparkles. Hold frames at the end give the loop a pause.

pub mod checkmark;
pub mod ease;
pub mod gif;

use std::path::Path;

use crate::canvas::Canvas;
use crate::foundation::core::{Point, Size};
use crate::foundation::error::{PosterError, PosterResult};
use crate::layer::Layer;
use crate::paint::Painter;
use crate::sink::SavedImage;

pub use checkmark::{BADGE_RADIUS, BadgePose, Sparkle};
pub use ease::Ease;

/// Reference edge the badge geometry is expressed in.
const UNIT_EDGE: f64 = 128.0;
/// Share of the animation spent dropping in.
const DROP_PHASE: f64 = 0.75;
const DROP_FROM: f64 = -30.0;
const SPARKLE_OFFSETS: [(f64, f64); 4] = [(-45.0, -35.0), (42.0, -30.0), (-35.0, 38.0), (40.0, 35.0)];
const SPARKLE_STAGGER: f64 = 0.15;

fn default_size() -> u32 {
    128
}
fn default_fps() -> u32 {
    15
}
fn default_total_frames() -> u32 {
    20
}
fn default_hold_frames() -> u32 {
    5
}
fn default_num_colors() -> usize {
    48
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmojiConfig {
    /// Square edge in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Animated frames, excluding the hold.
    #[serde(default = "default_total_frames")]
    pub total_frames: u32,
    #[serde(default = "default_hold_frames")]
    pub hold_frames: u32,
    #[serde(default = "default_num_colors")]
    pub num_colors: usize,
}

impl Default for EmojiConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            fps: default_fps(),
            total_frames: default_total_frames(),
            hold_frames: default_hold_frames(),
            num_colors: default_num_colors(),
        }
    }
}

impl EmojiConfig {
    pub fn from_json_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let cfg: Self = crate::config::from_path(path, "emoji config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PosterResult<()> {
        if !(32..=1024).contains(&self.size) {
            return Err(PosterError::validation(format!(
                "emoji size must be in 32..=1024, got {}",
                self.size
            )));
        }
        if self.fps == 0 || self.fps > 100 {
            return Err(PosterError::validation("emoji fps must be in 1..=100"));
        }
        if self.total_frames < 2 {
            return Err(PosterError::validation("emoji needs at least 2 animated frames"));
        }
        if !(2..=256).contains(&self.num_colors) {
            return Err(PosterError::validation("gif palette must hold 2..=256 colors"));
        }
        Ok(())
    }

    fn unit(&self) -> f64 {
        f64::from(self.size) / UNIT_EDGE
    }

    /// Horizontal center and resting height of the badge.
    pub fn target(&self) -> Point {
        let half = f64::from(self.size / 2);
        Point::new(half, half + 4.0 * self.unit())
    }

    /// Number of frames before duplicate merging.
    pub fn frame_count(&self) -> usize {
        (self.total_frames + self.hold_frames) as usize
    }
}

fn settled(cfg: &EmojiConfig) -> BadgePose {
    let u = cfg.unit();
    BadgePose {
        center: cfg.target(),
        radius: BADGE_RADIUS * u,
        ring_width: 3.0 * u,
        check_scale: u,
        sparkles: Vec::new(),
    }
}

fn dropping(cfg: &EmojiConfig, progress: f64) -> BadgePose {
    let u = cfg.unit();
    let target = cfg.target();
    let y = Ease::OutBounce.lerp(DROP_FROM * u, target.y, progress);
    let scale = Ease::OutQuad.lerp(0.5, 1.0, progress);
    BadgePose {
        center: Point::new(target.x, y.trunc()),
        radius: (BADGE_RADIUS * scale).trunc() * u,
        ring_width: (3.0 * scale).trunc().max(2.0) * u,
        check_scale: scale * u,
        sparkles: Vec::new(),
    }
}

fn settling(cfg: &EmojiConfig, progress: f64) -> BadgePose {
    let u = cfg.unit();
    let target = cfg.target();
    let pulse = 1.0 + 0.05 * (progress * std::f64::consts::TAU).sin();

    let fade = 1.0 - progress * 0.5;
    let base = (6.0 * fade).trunc();
    let mut sparkles = Vec::new();
    if base > 1.0 {
        for (j, (dx, dy)) in SPARKLE_OFFSETS.into_iter().enumerate() {
            let start = j as f64 * SPARKLE_STAGGER;
            if progress <= start {
                continue;
            }
            let local = Ease::Linear.apply((progress - start) / 0.4);
            let size = (base * (1.0 - local * 0.5)).trunc();
            if size > 1.0 {
                sparkles.push(Sparkle {
                    at: Point::new(target.x + dx * u, target.y + dy * u),
                    size: size * u,
                });
            }
        }
    }

    BadgePose {
        center: target,
        radius: (BADGE_RADIUS * pulse).trunc() * u,
        ring_width: 3.0 * u,
        check_scale: pulse * u,
        sparkles,
    }
}

/// Badge pose for every frame, hold frames included.
pub fn timeline(cfg: &EmojiConfig) -> Vec<BadgePose> {
    let last = f64::from(cfg.total_frames.saturating_sub(1).max(1));
    let mut poses: Vec<BadgePose> = (0..cfg.total_frames)
        .map(|i| {
            let t = f64::from(i) / last;
            if t <= DROP_PHASE {
                dropping(cfg, t / DROP_PHASE)
            } else {
                settling(cfg, (t - DROP_PHASE) / (1.0 - DROP_PHASE))
            }
        })
        .collect();
    poses.extend((0..cfg.hold_frames).map(|_| settled(cfg)));
    poses
}

/// Rasterize one pose over the gradient background.
pub fn render_frame(size: Size, pose: &BadgePose) -> PosterResult<Canvas> {
    let mut canvas = Canvas::new(size, checkmark::BG_TOP);
    let background = Layer::from_fn(size, |_, y| {
        checkmark::gradient_row(y, size.height).opaque()
    });
    canvas.composite_over(&background)?;

    let mut painter = Painter::new(size);
    pose.paint(&mut painter);
    canvas.composite_over(&painter.finish()?)?;
    Ok(canvas)
}

/// Every frame as straight RGBA, ready for the GIF sink.
pub fn frames(cfg: &EmojiConfig) -> PosterResult<Vec<image::RgbaImage>> {
    cfg.validate()?;
    let size = Size::new(cfg.size, cfg.size)?;
    timeline(cfg)
        .iter()
        .map(|pose| render_frame(size, pose).map(|c| c.to_rgba_image()))
        .collect()
}

#[tracing::instrument(fields(path = %out.display()))]
pub fn generate(cfg: &EmojiConfig, out: &Path) -> PosterResult<SavedImage> {
    let frames = frames(cfg)?;
    tracing::debug!(frames = frames.len(), "emoji frames rendered");
    gif::write_gif(frames, cfg.fps, cfg.num_colors, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_has_animation_plus_hold() {
        let cfg = EmojiConfig::default();
        let poses = timeline(&cfg);
        assert_eq!(poses.len(), 25);
        assert_eq!(poses.len(), cfg.frame_count());
    }

    #[test]
    fn first_frame_starts_above_the_canvas() {
        let poses = timeline(&EmojiConfig::default());
        assert_eq!(poses[0].center, Point::new(64.0, -30.0));
        assert_eq!(poses[0].radius, 19.0);
        assert_eq!(poses[0].ring_width, 2.0);
    }

    #[test]
    fn final_animated_frame_rests_on_target() {
        let cfg = EmojiConfig::default();
        let poses = timeline(&cfg);
        let last = &poses[cfg.total_frames as usize - 1];
        assert_eq!(last.center, cfg.target());
        assert_eq!(last.center, Point::new(64.0, 68.0));
        assert!(last.sparkles.is_empty());
    }

    #[test]
    fn sparkles_are_staggered() {
        let cfg = EmojiConfig::default();
        let poses = timeline(&cfg);
        let counts: Vec<usize> = poses[15..20].iter().map(|p| p.sparkles.len()).collect();
        // Grow in one by one, then shrink below the visible size together.
        assert_eq!(counts, vec![2, 3, 4, 0, 0]);
    }

    #[test]
    fn hold_frames_are_identical() {
        let poses = timeline(&EmojiConfig::default());
        assert!(poses[20..].windows(2).all(|w| w[0] == w[1]));
        assert_eq!(poses[24].radius, 38.0);
    }

    #[test]
    fn larger_canvas_scales_the_badge() {
        let cfg = EmojiConfig {
            size: 256,
            ..EmojiConfig::default()
        };
        assert_eq!(cfg.target(), Point::new(128.0, 136.0));
        assert_eq!(timeline(&cfg)[24].radius, 76.0);
    }

    #[test]
    fn bad_configs_are_rejected() {
        for cfg in [
            EmojiConfig {
                fps: 0,
                ..EmojiConfig::default()
            },
            EmojiConfig {
                total_frames: 1,
                ..EmojiConfig::default()
            },
            EmojiConfig {
                num_colors: 1,
                ..EmojiConfig::default()
            },
            EmojiConfig {
                size: 8,
                ..EmojiConfig::default()
            },
        ] {
            assert!(matches!(cfg.validate(), Err(PosterError::Validation(_))));
        }
    }

    #[test]
    fn rendered_frame_has_gradient_corners() {
        let size = Size::new(128, 128).unwrap();
        let canvas = render_frame(size, &timeline(&EmojiConfig::default())[24]).unwrap();
        assert_eq!(canvas.rgb_at(0, 0), Some(checkmark::BG_TOP));
        assert_eq!(canvas.rgb_at(0, 127), Some(checkmark::gradient_row(127, 128)));
        assert_eq!(canvas.rgb_at(64, 40), Some(checkmark::BADGE_WHITE));
    }
}
