//! Font lookup and text shaping.
//!
//! Fonts are looked up by file name inside an optional fonts directory. A missing or unreadable
//! file falls back to a system sans-serif face; the outcome is reported as a
//! [`FontResolution`] so callers (and tests) can see which path was taken.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PosterError, PosterResult};

/// Raw font bytes plus face index inside the file.
#[derive(Clone)]
pub struct FontFace {
    /// Where the face came from (file name or system family name).
    pub label: String,
    pub data: Arc<Vec<u8>>,
    pub index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("label", &self.label)
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Outcome of looking up one requested font.
#[derive(Clone, Debug)]
pub enum FontResolution {
    /// The requested file was found and read.
    Loaded(FontFace),
    /// The requested file was unavailable; a default face stands in.
    Fallback { requested: String, face: FontFace },
    /// Neither the requested file nor any default face is available.
    Unavailable { requested: String },
}

impl FontResolution {
    pub fn face(&self) -> Option<&FontFace> {
        match self {
            Self::Loaded(face) | Self::Fallback { face, .. } => Some(face),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Font file resolver with per-name caching.
#[derive(Debug)]
pub struct FontBook {
    dir: Option<PathBuf>,
    system_fallback: bool,
    default_face: Option<Option<FontFace>>,
    resolved: HashMap<String, FontResolution>,
}

impl FontBook {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            system_fallback: true,
            default_face: None,
            resolved: HashMap::new(),
        }
    }

    /// Enable or disable the system font fallback.
    pub fn with_system_fallback(mut self, enabled: bool) -> Self {
        self.system_fallback = enabled;
        self
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Resolve `file` (e.g. `"GeistMono-Regular.ttf"`), caching the outcome.
    pub fn resolve(&mut self, file: &str) -> FontResolution {
        if let Some(hit) = self.resolved.get(file) {
            return hit.clone();
        }

        let resolution = match self.read_font_file(file) {
            Ok(face) => FontResolution::Loaded(face),
            Err(err) => match self.default_face() {
                Some(face) => {
                    tracing::warn!(
                        font = file,
                        error = %err,
                        fallback = %face.label,
                        "font unavailable, using default face"
                    );
                    FontResolution::Fallback {
                        requested: file.to_string(),
                        face,
                    }
                }
                None => {
                    tracing::warn!(
                        font = file,
                        error = %err,
                        "font unavailable and no default face, text skipped"
                    );
                    FontResolution::Unavailable {
                        requested: file.to_string(),
                    }
                }
            },
        };

        self.resolved.insert(file.to_string(), resolution.clone());
        resolution
    }

    fn read_font_file(&self, file: &str) -> PosterResult<FontFace> {
        let dir = self
            .dir
            .as_ref()
            .ok_or_else(|| PosterError::font("no fonts directory configured"))?;
        let path = dir.join(file);
        let bytes = std::fs::read(&path).map_err(|e| PosterError::io(&path, e))?;
        if bytes.is_empty() {
            return Err(PosterError::font(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(FontFace {
            label: file.to_string(),
            data: Arc::new(bytes),
            index: 0,
        })
    }

    fn default_face(&mut self) -> Option<FontFace> {
        if !self.system_fallback {
            return None;
        }
        if self.default_face.is_none() {
            self.default_face = Some(load_system_default());
        }
        self.default_face.clone().flatten()
    }
}

fn load_system_default() -> Option<FontFace> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let query = usvg::fontdb::Query {
        families: &[
            usvg::fontdb::Family::SansSerif,
            usvg::fontdb::Family::Serif,
            usvg::fontdb::Family::Monospace,
        ],
        ..usvg::fontdb::Query::default()
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let label = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "system".to_string());

    db.with_face_data(id, |data, index| FontFace {
        label,
        data: Arc::new(data.to_vec()),
        index,
    })
}

struct RegisteredFont {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// A shaped single-paragraph string ready to paint.
pub struct ShapedText {
    pub(crate) layout: parley::Layout<Rgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl ShapedText {
    pub fn width(&self) -> f64 {
        f64::from(self.layout.width())
    }

    pub fn height(&self) -> f64 {
        f64::from(self.layout.height())
    }
}

/// Parley-backed shaper that registers each resolved face once.
pub struct TextEngine {
    book: FontBook,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    registered: HashMap<String, RegisteredFont>,
}

impl TextEngine {
    pub fn new(book: FontBook) -> Self {
        Self {
            book,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    pub fn book_mut(&mut self) -> &mut FontBook {
        &mut self.book
    }

    /// Shape `text` with the font stored in `file`.
    ///
    /// Returns `Ok(None)` when no face at all is available.
    pub fn shape(
        &mut self,
        file: &str,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> PosterResult<Option<ShapedText>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let resolution = self.book.resolve(file);
        let Some(face) = resolution.face() else {
            return Ok(None);
        };

        if !self.registered.contains_key(&face.label) {
            let families = self.font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(face.data.as_ref().clone()),
                None,
            );
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                PosterError::font(format!("no font families registered from '{}'", face.label))
            })?;
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| {
                    PosterError::font(format!("registered family in '{}' has no name", face.label))
                })?
                .to_string();
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
                face.index,
            );
            self.registered
                .insert(face.label.clone(), RegisteredFont { family, font });
        }

        let registered = self.registered.get(&face.label).ok_or_else(|| {
            PosterError::font(format!("font '{}' was not registered", face.label))
        })?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(registered.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(Some(ShapedText {
            layout,
            font: registered.font.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_without_default_is_unavailable() {
        let mut book =
            FontBook::new(Some(PathBuf::from("does/not/exist"))).with_system_fallback(false);
        let r = book.resolve("BigShoulders-Bold.ttf");
        assert!(matches!(
            r,
            FontResolution::Unavailable { ref requested } if requested == "BigShoulders-Bold.ttf"
        ));
        assert!(r.face().is_none());
    }

    #[test]
    fn resolution_is_cached() {
        let mut book = FontBook::new(None).with_system_fallback(false);
        let _ = book.resolve("a.ttf");
        assert_eq!(book.resolved.len(), 1);
        let _ = book.resolve("a.ttf");
        assert_eq!(book.resolved.len(), 1);
    }

    #[test]
    fn present_font_file_is_loaded() {
        let dir = PathBuf::from("target").join("fontbook_present");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Fake.ttf"), b"not really a font").unwrap();

        let mut book = FontBook::new(Some(dir)).with_system_fallback(false);
        let r = book.resolve("Fake.ttf");
        assert!(matches!(r, FontResolution::Loaded(ref f) if f.label == "Fake.ttf"));
        assert!(!r.is_fallback());
    }

    #[test]
    fn unavailable_font_shapes_to_none() {
        let book = FontBook::new(None).with_system_fallback(false);
        let mut engine = TextEngine::new(book);
        let shaped = engine
            .shape("Missing.ttf", "00:00", 44.0, Rgba8::new(255, 40, 40, 200))
            .unwrap();
        assert!(shaped.is_none());
    }

    #[test]
    fn invalid_size_is_rejected() {
        let mut engine = TextEngine::new(FontBook::new(None).with_system_fallback(false));
        assert!(engine.shape("x.ttf", "x", 0.0, Rgba8::default()).is_err());
    }
}
