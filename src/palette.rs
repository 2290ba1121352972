//! Fixed fluorescent palette shared read-only by every layer generator.

use crate::foundation::core::Rgb8;
use crate::foundation::error::{PosterError, PosterResult};

pub const HOT_PINK: Rgb8 = Rgb8::new(255, 20, 147);
pub const ELECTRIC_BLUE: Rgb8 = Rgb8::new(0, 120, 255);
pub const NEON_GREEN: Rgb8 = Rgb8::new(0, 255, 120);
pub const ACID_YELLOW: Rgb8 = Rgb8::new(255, 240, 0);
pub const DEEP_ORANGE: Rgb8 = Rgb8::new(255, 80, 0);
pub const VIVID_MAGENTA: Rgb8 = Rgb8::new(230, 0, 120);
pub const CYAN: Rgb8 = Rgb8::new(0, 230, 240);
pub const ULTRA_VIOLET: Rgb8 = Rgb8::new(100, 0, 220);
pub const SIGNAL_RED: Rgb8 = Rgb8::new(255, 40, 40);
pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
pub const NEAR_BLACK: Rgb8 = Rgb8::new(8, 4, 18);
pub const HOUSING_GRAY: Rgb8 = Rgb8::new(25, 25, 25);
pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

/// Named color sets used by the poster generators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Saturated colors used for mosaic mixing, accent blocks and swatches.
    pub brights: Vec<Rgb8>,
    /// Near-black substitutes for mosaic cells.
    pub darks: Vec<Rgb8>,
    /// Angular sector colors for the radial mosaic, ordered from angle -π.
    pub sectors: Vec<Rgb8>,
    /// Canvas background and corridor fill.
    pub background: Rgb8,
}

impl Palette {
    pub fn fluorescent() -> Self {
        Self {
            brights: vec![
                HOT_PINK,
                ELECTRIC_BLUE,
                NEON_GREEN,
                ACID_YELLOW,
                DEEP_ORANGE,
                VIVID_MAGENTA,
                CYAN,
                ULTRA_VIOLET,
                SIGNAL_RED,
            ],
            darks: vec![
                NEAR_BLACK,
                Rgb8::new(12, 6, 28),
                Rgb8::new(20, 0, 40),
                Rgb8::new(5, 10, 30),
                Rgb8::new(15, 5, 35),
            ],
            sectors: vec![
                HOT_PINK,
                ELECTRIC_BLUE,
                NEON_GREEN,
                ACID_YELLOW,
                DEEP_ORANGE,
                CYAN,
                ULTRA_VIOLET,
                VIVID_MAGENTA,
            ],
            background: NEAR_BLACK,
        }
    }

    /// Swatch order printed in the title bar.
    pub fn swatches(&self) -> [Rgb8; 9] {
        [
            HOT_PINK,
            ELECTRIC_BLUE,
            NEON_GREEN,
            ACID_YELLOW,
            DEEP_ORANGE,
            CYAN,
            ULTRA_VIOLET,
            SIGNAL_RED,
            VIVID_MAGENTA,
        ]
    }

    /// Reject palettes a generator could not draw a color from.
    pub fn validate(&self) -> PosterResult<()> {
        for (name, set) in [
            ("brights", &self.brights),
            ("darks", &self.darks),
            ("sectors", &self.sectors),
        ] {
            if set.is_empty() {
                return Err(PosterError::validation(format!(
                    "palette '{name}' must hold at least one color"
                )));
            }
        }
        Ok(())
    }

    /// Brightest channel value any dark color can have.
    pub fn darkest_ceiling(&self) -> u8 {
        self.darks.iter().map(|c| c.max_channel()).max().unwrap_or(0)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::fluorescent()
    }
}
