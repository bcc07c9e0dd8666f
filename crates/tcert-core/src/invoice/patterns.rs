//! Anchor phrases and regex patterns for the supported invoice layout.

use lazy_static::lazy_static;
use regex::Regex;

/// Consignee anchors; the vendor layout uses both spacings.
pub const SHIPPED_TO: [&str; 2] = ["Shipped to :", "Shipped to  :"];

pub const INVOICE_NO: &str = "Invoice No.";

pub const ORDER_NO: &str = "Order no:";

pub const DATED: &str = "Dated";

/// Ordinal markers that open a product line item.
pub const PRODUCT_ORDINALS: [&str; 3] = ["1.", "2.", "3."];

/// Separator between an order number and its date inside the order line.
pub const ORDER_DATE_SEPARATOR: &str = "dtd";

/// Placeholder order number for orders placed without a purchase order.
pub const VERBAL_ORDER: &str = "VERBAL";

lazy_static! {
    // Leading "<digits>." ordinal with trailing whitespace
    pub static ref ORDINAL_PREFIX: Regex = Regex::new(
        r"^\d+\.\s*"
    ).unwrap();

    // Batch code inside the batch line
    pub static ref BATCH_NO: Regex = Regex::new(
        r"(?i)batch no:\s*(\d+)"
    ).unwrap();
}
