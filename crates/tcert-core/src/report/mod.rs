//! Test-certificate composition.

mod composer;
pub mod sampler;

pub use composer::{
    clean_product_name, format_reading, parse_batch_code, resolve_order_no, ReportComposer,
};
pub use sampler::{FixedQcSampler, QcSampler, UniformQcSampler};

use crate::error::ComposeError;

/// Result type for composition operations.
pub type Result<T> = std::result::Result<T, ComposeError>;
