//! Single-page certificate rendering with lopdf.

use std::path::Path;

use chrono::Local;
use image::codecs::jpeg::JpegEncoder;
use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, warn};

use super::canvas::{font_resources, Canvas, HELVETICA, HELVETICA_BOLD, HELVETICA_OBLIQUE};
use super::table::{Align, HeaderStyle, Padding, TableStyle};
use super::{RenderedReport, ReportRenderer};
use crate::error::{LogoError, RenderError};
use crate::models::report::ReportDocument;

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

const LOGO_RESOURCE: &str = "Im0";
const LOGO_BOX: (f32, f32, f32, f32) = (220.0, 720.0, 100.0, 80.0);

const ORGANIZATION_AT: (f32, f32) = (200.0, 710.0);
const ADDRESS_AT: (f32, f32) = (50.0, 695.0);
const TITLE_AT: (f32, f32) = (230.0, 670.0);

const TABLE_X: f32 = 50.0;
/// Bottom edge of the details table.
const DETAILS_Y: f32 = 480.0;
/// Vertical gap between the details and results tables.
const TABLE_GAP: f32 = 50.0;

const NOTE_POSITIONS: [(f32, f32); 2] = [(50.0, 250.0), (50.0, 230.0)];
const WORKS_POSITIONS: [(f32, f32); 3] = [(100.0, 100.0), (135.0, 90.0), (145.0, 80.0)];

const DETAILS_STYLE: TableStyle = TableStyle {
    col_widths: &[150.0, 300.0],
    font: HELVETICA,
    font_size: 10.0,
    leading: 12.0,
    align: Align::Left,
    padding: Padding {
        bottom: 5.0,
        ..Padding::DEFAULT
    },
    header: None,
    grid_width: 1.0,
};

const RESULTS_STYLE: TableStyle = TableStyle {
    col_widths: &[50.0, 200.0, 200.0],
    font: HELVETICA,
    font_size: 10.0,
    leading: 12.0,
    align: Align::Center,
    padding: Padding::DEFAULT,
    header: Some(HeaderStyle {
        font: HELVETICA_BOLD,
        background: 128.0 / 255.0,
        text: 1.0,
        bottom_padding: 8.0,
    }),
    grid_width: 1.0,
};

const JPEG_QUALITY: u8 = 90;

/// Renders certificates at fixed coordinates on one US Letter page.
#[derive(Debug, Clone)]
pub struct PdfReportRenderer {
    producer: String,
}

impl PdfReportRenderer {
    pub fn new() -> Self {
        Self {
            producer: format!("tcert {}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Load the logo and add it as an image XObject.
    fn embed_logo(&self, doc: &mut Document, path: &Path) -> Result<ObjectId, LogoError> {
        if !path.exists() {
            return Err(LogoError::NotFound(path.to_path_buf()));
        }

        let unreadable = |reason: String| LogoError::Unreadable {
            path: path.to_path_buf(),
            reason,
        };

        let rgb = image::open(path).map_err(|e| unreadable(e.to_string()))?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut jpeg = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))
            .map_err(|e| unreadable(e.to_string()))?;

        debug!("Embedding {}x{} logo from {}", width, height, path.display());

        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        )
        .with_compression(false);

        Ok(doc.add_object(stream))
    }

    fn draw_page(&self, canvas: &mut Canvas, report: &ReportDocument, with_logo: bool) {
        let letterhead = &report.letterhead;

        if with_logo {
            let (x, y, w, h) = LOGO_BOX;
            canvas.draw_image(LOGO_RESOURCE, x, y, w, h);
        }

        canvas.draw_string(HELVETICA_BOLD, 12.0, ORGANIZATION_AT.0, ORGANIZATION_AT.1, &letterhead.organization);
        canvas.draw_string(HELVETICA_BOLD, 12.0, ADDRESS_AT.0, ADDRESS_AT.1, &letterhead.address);
        canvas.draw_string(HELVETICA_BOLD, 14.0, TITLE_AT.0, TITLE_AT.1, &letterhead.title);

        let details_height = DETAILS_STYLE.draw(canvas, &report.details, TABLE_X, DETAILS_Y);
        let results_y = DETAILS_Y - details_height - TABLE_GAP;
        RESULTS_STYLE.draw(canvas, &report.results, TABLE_X, results_y);

        for (note, (x, y)) in letterhead.notes.iter().zip(NOTE_POSITIONS) {
            canvas.draw_string(HELVETICA_OBLIQUE, 10.0, x, y, note);
        }
        for (line, (x, y)) in letterhead.works.iter().zip(WORKS_POSITIONS) {
            canvas.draw_string(HELVETICA_BOLD, 10.0, x, y, line);
        }
    }
}

impl Default for PdfReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, report: &ReportDocument, logo: Option<&Path>) -> Result<RenderedReport, RenderError> {
        let mut doc = Document::with_version("1.5");
        let mut diagnostics = Vec::new();

        let logo_id = logo.and_then(|path| match self.embed_logo(&mut doc, path) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("{}, rendering without logo", e);
                diagnostics.push(e);
                None
            }
        });

        let mut canvas = Canvas::new();
        self.draw_page(&mut canvas, report, logo_id.is_some());

        let content = Content {
            operations: canvas.into_operations(),
        };
        let encoded = content.encode().map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let mut resources = dictionary! { "Font" => font_resources() };
        if let Some(id) = logo_id {
            resources.set("XObject", dictionary! { LOGO_RESOURCE => id });
        }

        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal(self.producer.as_str()),
            "Title" => Object::string_literal(report.letterhead.title.as_str()),
            "CreationDate" => Object::string_literal(Local::now().format("D:%Y%m%d%H%M%S").to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| RenderError::Save(e.to_string()))?;

        debug!("Rendered report: {} bytes, {} diagnostics", bytes.len(), diagnostics.len());

        Ok(RenderedReport { bytes, diagnostics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{Letterhead, Table};

    fn document() -> ReportDocument {
        ReportDocument {
            letterhead: Letterhead::default(),
            details: Table::new([
                ["Consignee:", "Acme Corp"],
                ["Item:", "Copper Sulphate"],
                ["Order No.:", "OR99"],
                ["Invoice No.:", "12345 01/01/2025"],
                ["Quantity:", "Qty 500kg"],
                ["No. Of Bags:", "bag no 20"],
                ["Certificate No.:", "345 dated 01/01/2025"],
                ["Manufacturing Date:", "ch no: 777"],
            ]),
            results: Table::new([
                ["Sl No.", "Parameters", "Test Result\nBatch No:777"],
                ["1", "Appearance", "Bluish White Fine Crystals free from\nforeign material with\nslight yellowish additives"],
                ["2", "Copper Sulphate", "98%"],
                ["3", "Copper as Cu", "24.72%"],
                ["4", "pH of 10% solution", "3.2"],
                ["5", "Solubility of 10% Solution", "Clear blue solution"],
                ["6", "Additives", "2%"],
                ["7", "Iron", "< 0.075%"],
            ]),
        }
    }

    #[test]
    fn test_table_geometry() {
        let doc = document();
        assert_eq!(DETAILS_STYLE.height(&doc.details), 160.0);
        assert_eq!(RESULTS_STYLE.height(&doc.results), 185.0);
    }

    #[test]
    fn test_render_single_letter_page() {
        let rendered = PdfReportRenderer::new().render(&document(), None).unwrap();
        assert!(rendered.diagnostics.is_empty());
        assert!(rendered.bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&rendered.bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page = doc.get_dictionary(pages[&1]).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        let dims: Vec<f32> = media_box.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(dims, vec![0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_rendered_text_is_extractable() {
        let rendered = PdfReportRenderer::new().render(&document(), None).unwrap();
        let text = pdf_extract::extract_text_from_mem(&rendered.bytes).unwrap();
        assert!(text.contains("Test Report"));
        assert!(text.contains("Batch No:777"));
        assert!(text.contains("OR99"));
    }

    #[test]
    fn test_missing_logo_is_a_diagnostic() {
        let rendered = PdfReportRenderer::new()
            .render(&document(), Some(Path::new("/nonexistent/logo.jpeg")))
            .unwrap();
        assert_eq!(rendered.diagnostics.len(), 1);
        assert!(matches!(rendered.diagnostics[0], LogoError::NotFound(_)));
        assert!(Document::load_mem(&rendered.bytes).is_ok());
    }

    #[test]
    fn test_unreadable_logo_is_a_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();

        let rendered = PdfReportRenderer::new().render(&document(), Some(&path)).unwrap();
        assert!(matches!(rendered.diagnostics[..], [LogoError::Unreadable { .. }]));
    }

    #[test]
    fn test_logo_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        image::RgbImage::from_pixel(8, 6, image::Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();

        let rendered = PdfReportRenderer::new().render(&document(), Some(&path)).unwrap();
        assert!(rendered.diagnostics.is_empty());

        let doc = Document::load_mem(&rendered.bytes).unwrap();
        let has_image = doc.objects.values().any(|obj| match obj {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        });
        assert!(has_image);
    }
}
