use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::fingerprint;

/// What the sink wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// xxh3 digest of the flattened RGB bytes.
    pub fingerprint: u64,
}

impl std::fmt::Display for SavedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Saved: {} ({}x{})",
            self.path.display(),
            self.width,
            self.height
        )
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> PosterResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PosterError::io(parent, e))?;
    }
    Ok(())
}

/// Flatten `canvas` and write it as an 8-bit RGB PNG.
#[tracing::instrument(skip(canvas), fields(path = %path.display()))]
pub fn write_png(canvas: &Canvas, path: &Path) -> PosterResult<SavedImage> {
    let image = canvas.flatten();
    let digest = fingerprint(image.as_raw());

    ensure_parent_dir(path)?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => PosterError::io(path, io),
            other => PosterError::encode(format!("write png '{}': {other}", path.display())),
        })?;

    tracing::info!(fingerprint = %format!("{digest:016x}"), "png written");
    Ok(SavedImage {
        path: path.to_path_buf(),
        width: image.width(),
        height: image.height(),
        fingerprint: digest,
    })
}
