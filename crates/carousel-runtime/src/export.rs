#![forbid(unsafe_code)]

//! Slide export seam.
//!
//! Rasterization is a collaborator ([`SlideRenderer`]). [`export_all`] walks
//! the document, names the files, and collects per-slide failures so one bad
//! slide never stops the rest of the export.

use std::fmt;

use carousel_core::{ContentItem, Document, StyleConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("document has no slides to export")]
    Empty,
    #[error("unsupported pixel ratio {0}")]
    UnsupportedRatio(u8),
    #[error("failed to render slide {index}: {reason}")]
    Render { index: usize, reason: String },
}

/// Output resolution multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    Standard,
    #[default]
    High,
    Ultra,
}

impl ExportQuality {
    pub const ALL: [Self; 3] = [Self::Standard, Self::High, Self::Ultra];

    #[must_use]
    pub const fn pixel_ratio(self) -> u8 {
        match self {
            Self::Standard => 1,
            Self::High => 2,
            Self::Ultra => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard (1x)",
            Self::High => "High (2x)",
            Self::Ultra => "Ultra (3x)",
        }
    }

    pub fn from_pixel_ratio(ratio: u8) -> Result<Self, ExportError> {
        Self::ALL
            .into_iter()
            .find(|q| q.pixel_ratio() == ratio)
            .ok_or(ExportError::UnsupportedRatio(ratio))
    }

    /// Output canvas size for `style` at this quality.
    #[must_use]
    pub fn canvas_size(self, style: &StyleConfig) -> (u32, u32) {
        let (w, h) = style.aspect_ratio.dimensions();
        let ratio = u32::from(self.pixel_ratio());
        (w * ratio, h * ratio)
    }
}

impl fmt::Display for ExportQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rasterizes one slide to PNG bytes.
pub trait SlideRenderer {
    fn render(
        &mut self,
        item: &ContentItem,
        index: usize,
        style: &StyleConfig,
        quality: ExportQuality,
    ) -> Result<Vec<u8>, ExportError>;
}

/// A rendered slide ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// A slide that failed to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub index: usize,
    pub message: String,
}

/// Outcome of [`export_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<ExportedFile>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// `<base>-slide-<n>.png`, with `n` counted from 1.
#[must_use]
pub fn slide_file_name(base: &str, index: usize) -> String {
    format!("{base}-slide-{}.png", index + 1)
}

/// Render every slide of `doc` in order.
pub fn export_all<R: SlideRenderer + ?Sized>(
    renderer: &mut R,
    doc: &Document,
    base_name: &str,
    quality: ExportQuality,
) -> Result<ExportReport, ExportError> {
    if doc.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut report = ExportReport::default();
    for (index, item) in doc.items.iter().enumerate() {
        match renderer.render(item, index, &doc.style, quality) {
            Ok(png) => report.files.push(ExportedFile {
                file_name: slide_file_name(base_name, index),
                png,
            }),
            Err(err) => {
                tracing::warn!(
                    target: "carousel.export",
                    index,
                    error = %err,
                    "slide export failed"
                );
                report.failures.push(ExportFailure {
                    index,
                    message: err.to_string(),
                });
            }
        }
    }
    tracing::debug!(
        target: "carousel.export",
        files = report.files.len(),
        failures = report.failures.len(),
        quality = quality.label(),
        "export finished"
    );
    Ok(report)
}
