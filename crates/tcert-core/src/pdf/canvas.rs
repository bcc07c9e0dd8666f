//! Content-stream drawing primitives for standard Type1 fonts.

use lopdf::content::Operation;
use lopdf::{dictionary, Dictionary, Object, StringFormat};

/// A standard-14 font registered in the page resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    /// Resource name used by `Tf`.
    pub resource: &'static str,
    /// PostScript base font name.
    pub base: &'static str,
    widths: &'static [u16; 95],
}

pub const HELVETICA: Font = Font {
    resource: "F1",
    base: "Helvetica",
    widths: &HELVETICA_WIDTHS,
};

pub const HELVETICA_BOLD: Font = Font {
    resource: "F2",
    base: "Helvetica-Bold",
    widths: &HELVETICA_BOLD_WIDTHS,
};

pub const HELVETICA_OBLIQUE: Font = Font {
    resource: "F3",
    base: "Helvetica-Oblique",
    widths: &HELVETICA_WIDTHS,
};

pub const FONTS: [Font; 3] = [HELVETICA, HELVETICA_BOLD, HELVETICA_OBLIQUE];

/// Advance width used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

// WinAnsi glyph widths for 0x20..=0x7E, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl Font {
    /// Rendered width of `text` in points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| match c {
                ' '..='~' => u32::from(self.widths[c as usize - 0x20]),
                _ => u32::from(FALLBACK_WIDTH),
            })
            .sum();
        units as f32 * size / 1000.0
    }

    fn dictionary(&self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base,
            "Encoding" => "WinAnsiEncoding",
        }
    }
}

/// Font resource dictionary covering [`FONTS`].
pub fn font_resources() -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in FONTS {
        fonts.set(font.resource, font.dictionary());
    }
    fonts
}

/// Encode text for a WinAnsi simple font; unmappable characters become '?'.
fn encode_text(text: &str) -> Object {
    let bytes = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect::<Vec<u8>>();
    Object::String(bytes, StringFormat::Literal)
}

/// Accumulates page content operations.
#[derive(Debug, Default)]
pub struct Canvas {
    operations: Vec<Operation>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a single line of text with its baseline starting at (x, y).
    pub fn draw_string(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource.into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![encode_text(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Draw text horizontally centred on `center_x`.
    pub fn draw_centred_string(&mut self, font: Font, size: f32, center_x: f32, y: f32, text: &str) {
        let x = center_x - font.text_width(text, size) / 2.0;
        self.draw_string(font, size, x, y, text);
    }

    /// Set the fill colour as a gray level (0 black, 1 white).
    pub fn set_fill_gray(&mut self, gray: f32) {
        self.operations.push(Operation::new("g", vec![gray.into()]));
    }

    /// Fill a rectangle with the current fill colour.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.operations.extend([
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("f", vec![]),
        ]);
    }

    /// Stroke a black line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        self.operations.extend([
            Operation::new("w", vec![width.into()]),
            Operation::new("G", vec![0.0f32.into()]),
            Operation::new("m", vec![x1.into(), y1.into()]),
            Operation::new("l", vec![x2.into(), y2.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Paint an image XObject scaled into the given box.
    pub fn draw_image(&mut self, resource: &str, x: f32, y: f32, width: f32, height: f32) {
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![resource.into()]),
            Operation::new("Q", vec![]),
        ]);
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Test Report" in Helvetica-Bold: 611+556+556+333+278+722+556+611+611+389+333
        let width = HELVETICA_BOLD.text_width("Test Report", 1000.0);
        assert!((width - 5556.0).abs() < 0.01, "width {}", width);
        assert_eq!(HELVETICA.text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_non_ascii_uses_fallback_width() {
        assert!((HELVETICA.text_width("é", 1000.0) - 556.0).abs() < 0.01);
    }

    #[test]
    fn test_encode_text_latin1() {
        let Object::String(bytes, _) = encode_text("pH é ✓") else {
            panic!("expected a string object");
        };
        assert_eq!(bytes, vec![b'p', b'H', b' ', 0xE9, b' ', b'?']);
    }

    #[test]
    fn test_draw_string_operations() {
        let mut canvas = Canvas::new();
        canvas.draw_string(HELVETICA_BOLD, 14.0, 230.0, 670.0, "Test Report");
        let ops = canvas.into_operations();
        let names: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(names, ["BT", "Tf", "Td", "Tj", "ET"]);
        assert_eq!(ops[1].operands[0].as_name().unwrap(), b"F2");
    }

    #[test]
    fn test_font_resources() {
        let fonts = font_resources();
        assert_eq!(fonts.len(), 3);
        assert!(fonts.get(b"F3").is_ok());
    }
}
