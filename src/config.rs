//! JSON-facing configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::foundation::core::Size;
use crate::foundation::error::{PosterError, PosterResult};
use crate::posters::PosterVariant;

/// Parse a JSON document of type `T` from a reader; `what` names it in errors.
pub fn from_reader<T: DeserializeOwned, R: std::io::Read>(r: R, what: &str) -> PosterResult<T> {
    serde_json::from_reader(r).map_err(|e| PosterError::validation(format!("parse {what} JSON: {e}")))
}

/// Parse a JSON document of type `T` from a file on disk.
pub fn from_path<T: DeserializeOwned>(path: impl AsRef<Path>, what: &str) -> PosterResult<T> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| PosterError::io(path, e))?;
    from_reader(BufReader::new(f), what)
}

fn default_width() -> u32 {
    2400
}

fn default_height() -> u32 {
    3200
}

/// Settings for one poster render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PosterConfig {
    #[serde(default)]
    pub variant: PosterVariant,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Falls back to the variant's own seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Directory holding the poster `.ttf` files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts_dir: Option<PathBuf>,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self::for_variant(PosterVariant::default())
    }
}

impl PosterConfig {
    pub fn for_variant(variant: PosterVariant) -> Self {
        Self {
            variant,
            width: default_width(),
            height: default_height(),
            seed: None,
            fonts_dir: None,
        }
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        from_path(path, "poster config")
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| self.variant.default_seed())
    }

    pub fn size(&self) -> PosterResult<Size> {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: PosterConfig = from_reader("{}".as_bytes(), "poster config").unwrap();
        assert_eq!(cfg, PosterConfig::default());
        assert_eq!(cfg.effective_seed(), 1997);
        assert_eq!(cfg.size().unwrap(), Size::new(2400, 3200).unwrap());
    }

    #[test]
    fn wave_variant_has_its_own_seed() {
        let cfg: PosterConfig =
            from_reader(r#"{"variant": "wave", "width": 800}"#.as_bytes(), "poster config")
                .unwrap();
        assert_eq!(cfg.effective_seed(), 2003);
        assert_eq!(cfg.width, 800);

        let pinned = PosterConfig {
            seed: Some(5),
            ..cfg
        };
        assert_eq!(pinned.effective_seed(), 5);
    }

    #[test]
    fn zero_width_is_a_validation_error() {
        let cfg = PosterConfig {
            width: 0,
            ..PosterConfig::default()
        };
        assert!(matches!(cfg.size(), Err(PosterError::Validation(_))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let r: PosterResult<PosterConfig> = from_reader(r#"{"colour": 1}"#.as_bytes(), "poster config");
        let err = r.unwrap_err();
        assert!(err.to_string().contains("poster config"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = PosterConfig::from_json_path("no/such/poster.json").unwrap_err();
        assert!(err.to_string().contains("no/such/poster.json"));
    }
}
