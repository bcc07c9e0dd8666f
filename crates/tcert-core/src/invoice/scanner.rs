//! Single-pass anchor scanner over a decoded line sequence.

use std::time::Instant;

use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::models::lines::LineSequence;
use crate::models::record::{ExtractedRecord, ProductEntry};

use super::patterns::{DATED, INVOICE_NO, ORDER_NO, PRODUCT_ORDINALS, SHIPPED_TO};
use super::{RecordExtractor, Result};

/// Number of product line items collected before the scan stops.
///
/// The supported layout carries one product per certificate.
pub const PRODUCT_LIMIT: usize = 1;

/// Line offsets relative to an anchor line.
mod offset {
    pub const NEXT: usize = 1;
    pub const QUANTITY: usize = 2;
    pub const BATCH_NO: usize = 5;
    pub const BAG_COUNT: usize = 6;
}

/// Anchor phrases recognized by the scanner, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// "Shipped to :" (either spacing).
    ShippedTo,
    /// "Invoice No.".
    InvoiceNo,
    /// "Order no:".
    OrderNo,
    /// "Dated".
    Dated,
    /// Line starting with a "1.", "2." or "3." ordinal.
    Product,
}

impl Anchor {
    /// All anchors in the order they are tested against each line.
    pub const ALL: [Anchor; 5] = [
        Anchor::ShippedTo,
        Anchor::InvoiceNo,
        Anchor::OrderNo,
        Anchor::Dated,
        Anchor::Product,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Anchor::ShippedTo => SHIPPED_TO[0],
            Anchor::InvoiceNo => INVOICE_NO,
            Anchor::OrderNo => ORDER_NO,
            Anchor::Dated => DATED,
            Anchor::Product => "product",
        }
    }

    pub fn matches(self, line: &str) -> bool {
        match self {
            Anchor::ShippedTo => SHIPPED_TO.iter().any(|a| line.contains(a)),
            Anchor::InvoiceNo => line.contains(INVOICE_NO),
            Anchor::OrderNo => line.contains(ORDER_NO),
            Anchor::Dated => line.contains(DATED),
            Anchor::Product => PRODUCT_ORDINALS.iter().any(|p| line.starts_with(p)),
        }
    }
}

/// Bounds-checked view of the lines around one anchor hit.
struct AnchorHit<'a> {
    lines: &'a LineSequence,
    index: usize,
    anchor: Anchor,
}

impl<'a> AnchorHit<'a> {
    fn line(&self) -> &'a str {
        &self.lines[self.index]
    }

    fn at(&self, offset: usize) -> Result<&'a str> {
        self.lines
            .get(self.index + offset)
            .ok_or(ExtractionError::OutOfRange {
                anchor: self.anchor.label(),
                index: self.index,
                offset,
                len: self.lines.len(),
            })
    }

    /// Text after the last ':' of the line at `offset`, trimmed.
    fn suffix_at(&self, offset: usize) -> Result<String> {
        let line = self.at(offset)?;
        Ok(line.rsplit(':').next().unwrap_or_default().trim().to_string())
    }
}

/// Extracts invoice fields by fixed offsets from anchor phrases.
#[derive(Debug, Clone, Default)]
pub struct AnchorExtractor;

impl AnchorExtractor {
    pub fn new() -> Self {
        Self
    }

    fn apply(&self, hit: &AnchorHit<'_>, record: &mut ExtractedRecord) -> Result<()> {
        match hit.anchor {
            Anchor::ShippedTo => {
                record.company_name = Some(hit.at(offset::NEXT)?.to_string());
            }
            Anchor::InvoiceNo => {
                record.invoice_no = Some(hit.suffix_at(offset::NEXT)?);
            }
            Anchor::OrderNo => {
                record.order_no = Some(hit.line().to_string());
            }
            Anchor::Dated => {
                record.order_date = Some(hit.suffix_at(offset::NEXT)?);
            }
            Anchor::Product => {
                record.products.push(ProductEntry {
                    product_name: hit.line().to_string(),
                    quantity: hit.at(offset::QUANTITY)?.to_string(),
                    batch_no: hit.at(offset::BATCH_NO)?.to_string(),
                    bag_count: hit.at(offset::BAG_COUNT)?.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl RecordExtractor for AnchorExtractor {
    fn extract(&self, lines: &LineSequence) -> Result<ExtractedRecord> {
        let start = Instant::now();
        let mut record = ExtractedRecord::default();

        for (index, line) in lines.iter() {
            for anchor in Anchor::ALL.into_iter().filter(|a| a.matches(line)) {
                trace!("Anchor {:?} at line {}: {:?}", anchor, index, line);
                let hit = AnchorHit { lines, index, anchor };
                self.apply(&hit, &mut record)?;
            }

            if record.products.len() >= PRODUCT_LIMIT {
                debug!("Product line item found at line {}, stopping scan", index);
                break;
            }
        }

        debug!(
            "Scanned {} lines in {:?}, missing fields: {:?}",
            lines.len(),
            start.elapsed(),
            record.missing_fields()
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(raw: &[&str]) -> LineSequence {
        raw.iter().copied().collect()
    }

    fn scenario() -> LineSequence {
        lines(&[
            "Shipped to :",
            "Acme Corp",
            "Invoice No.",
            "Inv: 12345",
            "Order no: OR99 dtd 2025-01-01",
            "Dated",
            "D: 01/01/2025",
            "1. Copper Sulphate",
            "unused",
            "Qty 500kg",
            "unused",
            "unused",
            "batch no: 777",
            "bag no 20",
        ])
    }

    #[test]
    fn test_extract_scenario() {
        let record = AnchorExtractor::new().extract(&scenario()).unwrap();

        assert_eq!(record.company_name.as_deref(), Some("Acme Corp"));
        assert_eq!(record.invoice_no.as_deref(), Some("12345"));
        assert_eq!(record.order_no.as_deref(), Some("Order no: OR99 dtd 2025-01-01"));
        assert_eq!(record.order_date.as_deref(), Some("01/01/2025"));
        assert_eq!(
            record.products,
            vec![ProductEntry {
                product_name: "1. Copper Sulphate".to_string(),
                quantity: "Qty 500kg".to_string(),
                batch_no: "batch no: 777".to_string(),
                bag_count: "bag no 20".to_string(),
            }]
        );
    }

    #[test]
    fn test_no_anchors_yields_empty_record() {
        let record = AnchorExtractor::new()
            .extract(&lines(&["Tax invoice", "Page 1 of 1", "Thank you"]))
            .unwrap();
        assert_eq!(record, ExtractedRecord::default());
    }

    #[test]
    fn test_empty_sequence() {
        let record = AnchorExtractor::new().extract(&LineSequence::default()).unwrap();
        assert!(record.products.is_empty());
    }

    #[test]
    fn test_double_space_shipped_to() {
        let record = AnchorExtractor::new()
            .extract(&lines(&["Shipped to  :", "Beta Ltd"]))
            .unwrap();
        assert_eq!(record.company_name.as_deref(), Some("Beta Ltd"));
    }

    #[test]
    fn test_product_near_end_is_out_of_range() {
        for tail in 0..6 {
            let mut raw = vec!["1. Copper Sulphate"];
            raw.extend(std::iter::repeat("filler").take(tail));
            let err = AnchorExtractor::new().extract(&lines(&raw)).unwrap_err();
            assert!(
                matches!(err, ExtractionError::OutOfRange { anchor: "product", index: 0, .. }),
                "tail {} gave {:?}",
                tail,
                err
            );
        }
    }

    #[test]
    fn test_product_with_exactly_six_following_lines() {
        let raw = ["1. Item", "a", "qty", "b", "c", "batch no: 1", "bags"];
        let record = AnchorExtractor::new().extract(&lines(&raw)).unwrap();
        assert_eq!(record.products[0].bag_count, "bags");
    }

    #[test]
    fn test_trailing_shipped_to_is_out_of_range() {
        let err = AnchorExtractor::new()
            .extract(&lines(&["header", "Shipped to :"]))
            .unwrap_err();
        assert_eq!(
            err,
            ExtractionError::OutOfRange {
                anchor: "Shipped to :",
                index: 1,
                offset: 1,
                len: 2,
            }
        );
    }

    #[test]
    fn test_only_first_product_collected() {
        let raw = [
            "1. First", "x", "q1", "x", "x", "batch no: 1", "b1",
            "2. Second", "x", "q2", "x", "x", "batch no: 2", "b2",
            "3. Third", "x", "q3", "x", "x", "batch no: 3", "b3",
        ];
        let record = AnchorExtractor::new().extract(&lines(&raw)).unwrap();
        assert_eq!(record.products.len(), 1);
        assert_eq!(record.products[0].product_name, "1. First");
    }

    #[test]
    fn test_anchors_after_product_are_ignored() {
        let raw = [
            "2. Item", "x", "q", "x", "x", "batch no: 9", "bags",
            "Shipped to :", "Late Corp",
        ];
        let record = AnchorExtractor::new().extract(&lines(&raw)).unwrap();
        assert_eq!(record.company_name, None);
    }

    #[test]
    fn test_later_header_anchor_overwrites_earlier() {
        let raw = ["Invoice No.", "No: 001", "Invoice No.", "No: 002"];
        let record = AnchorExtractor::new().extract(&lines(&raw)).unwrap();
        assert_eq!(record.invoice_no.as_deref(), Some("002"));
    }

    #[test]
    fn test_multiple_anchors_on_one_line() {
        let raw = ["Invoice No. / Dated", "Ref: 2025/07: 42"];
        let record = AnchorExtractor::new().extract(&lines(&raw)).unwrap();
        assert_eq!(record.invoice_no.as_deref(), Some("42"));
        assert_eq!(record.order_date.as_deref(), Some("42"));
    }

    #[test]
    fn test_suffix_without_colon_is_whole_line() {
        let record = AnchorExtractor::new()
            .extract(&lines(&["Dated", "12/03/2025"]))
            .unwrap();
        assert_eq!(record.order_date.as_deref(), Some("12/03/2025"));
    }

    #[test]
    fn test_extract_from_text() {
        let text = "Shipped to :\n\n  Gamma Traders  \nOrder no: PO-7 dtd 02/02/2025\n";
        let record = AnchorExtractor::new().extract_from_text(text).unwrap();
        assert_eq!(record.company_name.as_deref(), Some("Gamma Traders"));
        assert_eq!(record.order_no.as_deref(), Some("Order no: PO-7 dtd 02/02/2025"));
    }
}
