//! Fields extracted from a vendor invoice.

use serde::{Deserialize, Serialize};

/// Structured output of the anchor scanner.
///
/// Every header field is optional: an anchor that never appears leaves its
/// field unset, and absence is only treated as a problem when a report is
/// composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Consignee, taken from the line after "Shipped to :".
    pub company_name: Option<String>,

    /// Order date, suffix of the line after "Dated".
    pub order_date: Option<String>,

    /// Invoice number, suffix of the line after "Invoice No.".
    pub invoice_no: Option<String>,

    /// The whole "Order no: ... dtd ..." line, kept unparsed.
    pub order_no: Option<String>,

    /// Product line items in document order.
    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

/// A single product line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// The anchor line, including its ordinal marker (e.g. "1. Copper Sulphate").
    pub product_name: String,

    /// Quantity line.
    pub quantity: String,

    /// Batch line, expected to contain "batch no: <digits>" and end in a date.
    pub batch_no: String,

    /// Bag count line.
    pub bag_count: String,
}

impl ExtractedRecord {
    /// Names of header fields that were not found, plus products if none were.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.company_name.is_none() {
            missing.push("company_name");
        }
        if self.invoice_no.is_none() {
            missing.push("invoice_no");
        }
        if self.order_no.is_none() {
            missing.push("order_no");
        }
        if self.order_date.is_none() {
            missing.push("order_date");
        }
        if self.products.is_empty() {
            missing.push("products");
        }

        missing
    }

    /// The first product line item, if any.
    pub fn first_product(&self) -> Option<&ProductEntry> {
        self.products.first()
    }
}
