//! Invoice field extraction module.

mod scanner;
pub mod patterns;

pub use scanner::{Anchor, AnchorExtractor, PRODUCT_LIMIT};

use crate::error::ExtractionError;
use crate::models::lines::LineSequence;
use crate::models::record::ExtractedRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for invoice field extractors.
pub trait RecordExtractor {
    /// Extract fields from a decoded line sequence.
    fn extract(&self, lines: &LineSequence) -> Result<ExtractedRecord>;

    /// Extract fields from plain text.
    fn extract_from_text(&self, text: &str) -> Result<ExtractedRecord> {
        self.extract(&LineSequence::from_text(text))
    }
}
