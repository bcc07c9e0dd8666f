//! PDF decoding and rendering.

mod canvas;
mod decoder;
mod renderer;
mod table;

pub use canvas::{Canvas, Font, HELVETICA, HELVETICA_BOLD, HELVETICA_OBLIQUE};
pub use decoder::PdfTextDecoder;
pub use renderer::{PdfReportRenderer, PAGE_HEIGHT, PAGE_WIDTH};
pub use table::{Align, HeaderStyle, Padding, TableStyle};

use std::path::Path;

use crate::error::{LogoError, PdfError, RenderError};
use crate::models::lines::LineSequence;
use crate::models::report::ReportDocument;

/// Result type for PDF decoding.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Converts a PDF byte stream into ordered text lines.
pub trait TextDecoder {
    /// Decode every page, preserving page and within-page reading order.
    fn decode_to_lines(&self, data: &[u8]) -> Result<LineSequence>;
}

/// Finished document bytes plus any recoverable problems met while rendering.
#[derive(Debug)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    /// Logo failures; the document was produced without the logo.
    pub diagnostics: Vec<LogoError>,
}

/// Lays out a report document on a fixed page template.
pub trait ReportRenderer {
    fn render(
        &self,
        report: &ReportDocument,
        logo: Option<&Path>,
    ) -> std::result::Result<RenderedReport, RenderError>;
}
