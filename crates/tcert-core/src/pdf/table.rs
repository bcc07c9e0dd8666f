//! Fixed-style grid tables drawn onto a [`Canvas`].

use crate::models::report::Table;

use super::canvas::{Canvas, Font};

/// Horizontal alignment of cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Cell padding in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const DEFAULT: Padding = Padding {
        left: 6.0,
        right: 6.0,
        top: 3.0,
        bottom: 3.0,
    };
}

/// Styling applied to row 0 when the table has a header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyle {
    pub font: Font,
    /// Background gray level.
    pub background: f32,
    /// Text gray level.
    pub text: f32,
    pub bottom_padding: f32,
}

/// Layout and styling of a grid table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub col_widths: &'static [f32],
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub align: Align,
    pub padding: Padding,
    pub header: Option<HeaderStyle>,
    pub grid_width: f32,
}

impl TableStyle {
    fn bottom_padding(&self, row: usize) -> f32 {
        match (&self.header, row) {
            (Some(header), 0) => header.bottom_padding,
            _ => self.padding.bottom,
        }
    }

    fn font_for(&self, row: usize) -> Font {
        match (&self.header, row) {
            (Some(header), 0) => header.font,
            _ => self.font,
        }
    }

    /// Height of each row: tallest cell's lines times leading, plus padding.
    pub fn row_heights(&self, table: &Table) -> Vec<f32> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let lines = row.iter().map(|cell| cell.split('\n').count()).max().unwrap_or(1);
                lines as f32 * self.leading + self.padding.top + self.bottom_padding(i)
            })
            .collect()
    }

    /// Total height of the drawn table.
    pub fn height(&self, table: &Table) -> f32 {
        self.row_heights(table).iter().sum()
    }

    /// Draw `table` with its lower-left corner at (x, y). Returns the height used.
    pub fn draw(&self, canvas: &mut Canvas, table: &Table, x: f32, y: f32) -> f32 {
        let heights = self.row_heights(table);
        let total: f32 = heights.iter().sum();
        let width: f32 = self.col_widths.iter().sum();

        let mut row_top = y + total;
        let mut row_bottoms = Vec::with_capacity(heights.len());

        for (i, (row, height)) in table.rows.iter().zip(&heights).enumerate() {
            let row_bottom = row_top - height;
            row_bottoms.push(row_bottom);

            let header = self.header.filter(|_| i == 0);
            if let Some(header) = header {
                canvas.set_fill_gray(header.background);
                canvas.fill_rect(x, row_bottom, width, *height);
                canvas.set_fill_gray(header.text);
            }

            let font = self.font_for(i);
            let mut cell_x = x;
            for (cell, col_width) in row.iter().zip(self.col_widths) {
                self.draw_cell(canvas, font, cell, cell_x, *col_width, row_bottom, self.bottom_padding(i));
                cell_x += col_width;
            }

            if header.is_some() {
                canvas.set_fill_gray(0.0);
            }
            row_top = row_bottom;
        }

        self.draw_grid(canvas, x, y, width, total, &row_bottoms);
        total
    }

    fn draw_cell(
        &self,
        canvas: &mut Canvas,
        font: Font,
        text: &str,
        cell_x: f32,
        col_width: f32,
        row_bottom: f32,
        bottom_padding: f32,
    ) {
        let lines: Vec<&str> = text.split('\n').collect();
        // Bottom-aligned: the last line sits on the bottom padding.
        let mut baseline =
            row_bottom + bottom_padding + lines.len() as f32 * self.leading - self.font_size;

        for line in lines {
            match self.align {
                Align::Left => {
                    canvas.draw_string(font, self.font_size, cell_x + self.padding.left, baseline, line);
                }
                Align::Center => {
                    let center =
                        cell_x + (self.padding.left + col_width - self.padding.right) / 2.0;
                    canvas.draw_centred_string(font, self.font_size, center, baseline, line);
                }
            }
            baseline -= self.leading;
        }
    }

    fn draw_grid(&self, canvas: &mut Canvas, x: f32, y: f32, width: f32, height: f32, row_bottoms: &[f32]) {
        let top = y + height;
        canvas.line(x, top, x + width, top, self.grid_width);
        for &bottom in row_bottoms {
            canvas.line(x, bottom, x + width, bottom, self.grid_width);
        }

        let mut col_x = x;
        canvas.line(col_x, y, col_x, top, self.grid_width);
        for col_width in self.col_widths {
            col_x += col_width;
            canvas.line(col_x, y, col_x, top, self.grid_width);
        }
    }
}
