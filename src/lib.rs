#![forbid(unsafe_code)]

pub mod canvas;
pub mod composite;
pub mod config;
pub mod emoji;
pub mod foundation;
pub mod layer;
pub mod layers;
pub mod paint;
pub mod palette;
pub mod pipeline;
pub mod posters;
pub mod report;
pub mod sink;
pub mod text;

pub use canvas::Canvas;
pub use config::PosterConfig;
pub use emoji::EmojiConfig;
pub use foundation::core::{Rgb8, Rgba8, Size};
pub use foundation::error::{PosterError, PosterResult};
pub use foundation::rng::Rng64;
pub use layer::Layer;
pub use layers::{LayerGroup, Marks};
pub use palette::Palette;
pub use pipeline::{Compositor, LayerCtx, LayerGenerator};
pub use posters::PosterVariant;
pub use report::{GeneratedPdf, MonthlyReport, ReportData, SampleMonth};
pub use sink::SavedImage;
pub use text::{FontBook, FontResolution, TextEngine};
