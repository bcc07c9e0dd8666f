//! Derived report data and the content model handed to the renderer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// MIME type of generated reports.
pub const REPORT_MIME: &str = "application/pdf";

/// Values derived from an [`ExtractedRecord`](super::record::ExtractedRecord)
/// for a single test certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Consignee company name.
    pub consignee: String,

    /// Product name with its ordinal marker removed.
    pub item: String,

    /// Resolved order number, or "VERBAL".
    pub order_no: String,

    /// Invoice number.
    pub invoice_no: String,

    /// Order date as printed on the invoice.
    pub order_date: String,

    /// Quantity line.
    pub quantity: String,

    /// Bag count line.
    pub bag_count: String,

    /// Digits parsed from "batch no: <digits>".
    pub batch_code: String,

    /// Sampled copper content in percent, 2 decimal places.
    pub copper_percent: Decimal,

    /// Sampled pH of a 10% solution, 1 decimal place.
    pub ph: Decimal,

    /// Last 10 characters of the batch line.
    pub manufacturing_date: String,
}

impl ReportRecord {
    /// Last 3 characters of the invoice number.
    pub fn invoice_suffix(&self) -> &str {
        last_chars(&self.invoice_no, 3)
    }

    /// Certificate number: invoice suffix and order date.
    pub fn certificate_no(&self) -> String {
        format!("{} dated {}", self.invoice_suffix(), self.order_date)
    }

    /// Download name of the rendered report.
    ///
    /// Path separators in the product name are replaced so the result is a
    /// single file name.
    pub fn file_name(&self) -> String {
        let item: String = self
            .item
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("Test_Report{}{}.pdf", item, self.invoice_suffix())
    }
}

/// Everything the renderer draws: static letterhead plus two tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Header and footer text.
    pub letterhead: Letterhead,

    /// Consignee key/value table.
    pub details: Table,

    /// QC results table; row 0 is the header.
    pub results: Table,
}

/// A table of text cells. Cells may contain `\n` for multi-line text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text, or `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Fixed organization text printed on every certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letterhead {
    pub organization: String,
    pub address: String,
    pub title: String,
    /// Italic footnotes below the results table.
    pub notes: Vec<String>,
    /// Bold works/contact/registration lines at the bottom of the page.
    pub works: Vec<String>,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            organization: "Atma Metchem Pvt. Ltd. ".to_string(),
            address: "BF-180, SECTOR-1, SALT LAKE, KOLKATA 700064, MOBILE - 9830692043/9830272025 "
                .to_string(),
            title: "Test Report".to_string(),
            notes: vec![
                "** Additional additives are present for optimum coating.".to_string(),
                "** This is a computer-generated document & does not need a signature.".to_string(),
            ],
            works: vec![
                "WORKS: P.O. GANGANAGAR, NORTH 24 PARAGANAS (WEST BENGAL) 700132".to_string(),
                "EMAIL: info@atmametchem.com, atmametchem_2006@yahoo.co.in".to_string(),
                "GST: 19AACCA5773F1ZL   CIN NO. U24119WB1992PTC056507".to_string(),
            ],
        }
    }
}

/// The last `n` characters of `s`, or all of `s` when it is shorter.
pub(crate) fn last_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    let start = s
        .char_indices()
        .nth(count - n)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> ReportRecord {
        ReportRecord {
            consignee: "Acme Corp".to_string(),
            item: "Copper Sulphate".to_string(),
            order_no: "OR99".to_string(),
            invoice_no: "12345".to_string(),
            order_date: "01/01/2025".to_string(),
            quantity: "Qty 500kg".to_string(),
            bag_count: "bag no 20".to_string(),
            batch_code: "777".to_string(),
            copper_percent: Decimal::new(2472, 2),
            ph: Decimal::new(32, 1),
            manufacturing_date: "ch no: 777".to_string(),
        }
    }

    #[test]
    fn test_last_chars() {
        assert_eq!(last_chars("12345", 3), "345");
        assert_eq!(last_chars("45", 3), "45");
        assert_eq!(last_chars("", 3), "");
        assert_eq!(last_chars("naïve café", 4), "café");
    }

    #[test]
    fn test_certificate_no() {
        assert_eq!(record().certificate_no(), "345 dated 01/01/2025");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(record().file_name(), "Test_ReportCopper Sulphate345.pdf");
    }

    #[test]
    fn test_file_name_replaces_separators() {
        let mut r = record();
        r.item = "CuSO4 5H2O/Technical".to_string();
        assert_eq!(r.file_name(), "Test_ReportCuSO4 5H2O_Technical345.pdf");
    }

    #[test]
    fn test_table_cell() {
        let table = Table::new([["a", "b"], ["c", "d"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 0), Some("c"));
        assert_eq!(table.cell(2, 0), None);
    }
}
