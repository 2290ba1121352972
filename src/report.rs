//! Monthly sales report as an A4 PDF.

pub mod layout;
pub mod model;
pub mod pdf;

use std::path::{Path, PathBuf};

use crate::foundation::error::{PosterError, PosterResult};
use crate::sink::ensure_parent_dir;

pub use model::{Department, MonthlyReport, Product, ReportData, SampleMonth};

/// A written report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPdf {
    pub path: PathBuf,
    pub pages: usize,
    pub bytes: usize,
}

impl std::fmt::Display for GeneratedPdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Generated: {}", self.path.display())
    }
}

/// Lay out and encode `report` without touching the filesystem.
pub fn render(report: &MonthlyReport) -> PosterResult<(usize, Vec<u8>)> {
    report.data.validate()?;
    let pages = layout::layout(report);
    Ok((pages.len(), pdf::encode(&pages, &report.title())))
}

#[tracing::instrument(skip(report), fields(title = %report.title(), path = %out.display()))]
pub fn generate(report: &MonthlyReport, out: &Path) -> PosterResult<GeneratedPdf> {
    let (pages, bytes) = render(report)?;
    ensure_parent_dir(out)?;
    std::fs::write(out, &bytes).map_err(|e| PosterError::io(out, e))?;
    tracing::info!(pages, bytes = bytes.len(), "pdf written");
    Ok(GeneratedPdf {
        path: out.to_path_buf(),
        pages,
        bytes: bytes.len(),
    })
}

/// Write every built-in sample month into `dir`.
pub fn generate_samples(dir: &Path) -> PosterResult<Vec<GeneratedPdf>> {
    SampleMonth::ALL
        .iter()
        .map(|month| generate(&month.report(), &dir.join(month.file_name())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_line_names_the_path() {
        let dir = PathBuf::from("target").join("report_unit");
        let out = dir.join("jan.pdf");
        let done = generate(&model::january(), &out).unwrap();
        assert_eq!(done.pages, 2);
        assert_eq!(done.to_string(), format!("Generated: {}", out.display()));
        assert_eq!(std::fs::metadata(&out).unwrap().len() as usize, done.bytes);
    }

    #[test]
    fn invalid_data_writes_nothing() {
        let out = PathBuf::from("target").join("report_unit").join("bad.pdf");
        let _ = std::fs::remove_file(&out);
        let mut report = model::february();
        report.data.total = 0;
        assert!(matches!(
            generate(&report, &out),
            Err(PosterError::Validation(_))
        ));
        assert!(!out.exists());
    }
}
