//! Derives certificate values from an extracted record.

use rand::rngs::ThreadRng;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::ComposeError;
use crate::invoice::patterns::{BATCH_NO, ORDER_DATE_SEPARATOR, ORDER_NO, ORDINAL_PREFIX, VERBAL_ORDER};
use crate::models::config::QcConfig;
use crate::models::record::ExtractedRecord;
use crate::models::report::{last_chars, Letterhead, ReportDocument, ReportRecord, Table};

use super::sampler::{QcSampler, UniformQcSampler};
use super::Result;

/// Width of the date at the end of a batch line.
const MANUFACTURING_DATE_LEN: usize = 10;

const APPEARANCE: &str =
    "Bluish White Fine Crystals free from\nforeign material with\nslight yellowish additives";

/// Builds [`ReportRecord`]s and the renderer content model.
#[derive(Debug, Clone)]
pub struct ReportComposer<S> {
    sampler: S,
    letterhead: Letterhead,
}

impl ReportComposer<UniformQcSampler<ThreadRng>> {
    /// Composer with default QC ranges and an unseeded sampler.
    pub fn new() -> Self {
        Self::with_sampler(UniformQcSampler::default())
    }

    /// Composer sampling from the given ranges. Rejects invalid ranges.
    pub fn with_ranges(ranges: QcConfig) -> crate::error::Result<Self> {
        Ok(Self::with_sampler(UniformQcSampler::from_thread_rng(ranges)?))
    }
}

impl Default for ReportComposer<UniformQcSampler<ThreadRng>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: QcSampler> ReportComposer<S> {
    /// Composer drawing QC values from `sampler`.
    pub fn with_sampler(sampler: S) -> Self {
        Self {
            sampler,
            letterhead: Letterhead::default(),
        }
    }

    /// Replace the static letterhead text.
    pub fn with_letterhead(mut self, letterhead: Letterhead) -> Self {
        self.letterhead = letterhead;
        self
    }

    /// Derive the report record. Samples fresh QC values on every call.
    pub fn compose(&mut self, record: &ExtractedRecord) -> Result<ReportRecord> {
        let product = record.first_product().ok_or(ComposeError::MissingProduct)?;

        let batch_code = parse_batch_code(&product.batch_no)?;

        // A missing order number prints as VERBAL.
        for field in record.missing_fields().into_iter().filter(|f| *f != "order_no") {
            warn!("Field {} not found in document, printing it blank", field);
        }

        let report = ReportRecord {
            consignee: record.company_name.clone().unwrap_or_default(),
            item: clean_product_name(&product.product_name),
            order_no: resolve_order_no(record.order_no.as_deref()),
            invoice_no: record.invoice_no.clone().unwrap_or_default(),
            order_date: record.order_date.clone().unwrap_or_default(),
            quantity: product.quantity.clone(),
            bag_count: product.bag_count.clone(),
            batch_code,
            copper_percent: self.sampler.copper_percent(),
            ph: self.sampler.ph(),
            manufacturing_date: last_chars(&product.batch_no, MANUFACTURING_DATE_LEN).to_string(),
        };

        debug!(
            "Composed report for {:?}: order {}, batch {}, Cu {}%, pH {}",
            report.item, report.order_no, report.batch_code, report.copper_percent, report.ph
        );

        Ok(report)
    }

    /// Lay out the letterhead and both tables for rendering.
    pub fn document(&self, report: &ReportRecord) -> ReportDocument {
        let details = Table::new([
            ["Consignee:".to_string(), report.consignee.clone()],
            ["Item:".to_string(), report.item.clone()],
            ["Order No.:".to_string(), report.order_no.clone()],
            [
                "Invoice No.:".to_string(),
                format!("{} {}", report.invoice_no, report.order_date),
            ],
            ["Quantity:".to_string(), report.quantity.clone()],
            ["No. Of Bags:".to_string(), report.bag_count.clone()],
            ["Certificate No.:".to_string(), report.certificate_no()],
            ["Manufacturing Date:".to_string(), report.manufacturing_date.clone()],
        ]);

        let results = Table::new([
            [
                "Sl No.".to_string(),
                "Parameters".to_string(),
                format!("Test Result\nBatch No:{}", report.batch_code),
            ],
            ["1".into(), "Appearance".into(), APPEARANCE.into()],
            ["2".into(), "Copper Sulphate".into(), "98%".into()],
            ["3".into(), "Copper as Cu".into(), format!("{}%", format_reading(report.copper_percent))],
            ["4".into(), "pH of 10% solution".into(), format_reading(report.ph)],
            ["5".into(), "Solubility of 10% Solution".into(), "Clear blue solution".into()],
            ["6".into(), "Additives".into(), "2%".into()],
            ["7".into(), "Iron".into(), "< 0.075%".into()],
        ]);

        ReportDocument {
            letterhead: self.letterhead.clone(),
            details,
            results,
        }
    }
}

/// Shortest decimal form with at least one fractional digit: 24.70 prints as 24.7, 3 as 3.0.
pub fn format_reading(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}

/// Strip one leading "<digits>." ordinal and the whitespace after it.
pub fn clean_product_name(name: &str) -> String {
    ORDINAL_PREFIX.replace(name, "").into_owned()
}

/// Order number between "Order no:" and "dtd", or "VERBAL" when absent.
pub fn resolve_order_no(order_line: Option<&str>) -> String {
    let Some(line) = order_line else {
        return VERBAL_ORDER.to_string();
    };
    let after_label = line.rsplit(ORDER_NO).next().unwrap_or_default().trim();
    after_label
        .split(ORDER_DATE_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Digits following "batch no:" (any case).
pub fn parse_batch_code(batch_line: &str) -> Result<String> {
    BATCH_NO
        .captures(batch_line)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ComposeError::BatchParse {
            value: batch_line.to_string(),
        })
}
