//! Core library for test-certificate generation.
//!
//! This crate provides:
//! - PDF text decoding into ordered line sequences
//! - Anchor-based field extraction for the supported invoice layout
//! - Certificate composition with sampled quality-control values
//! - Fixed-layout single-page PDF rendering

pub mod error;
pub mod models;
pub mod pdf;
pub mod invoice;
pub mod report;
pub mod pipeline;

pub use error::{TcertError, Result};
pub use models::config::TcertConfig;
pub use models::lines::LineSequence;
pub use models::record::{ExtractedRecord, ProductEntry};
pub use models::report::{ReportDocument, ReportRecord};
pub use pdf::{PdfReportRenderer, PdfTextDecoder, RenderedReport, ReportRenderer, TextDecoder};
pub use invoice::{AnchorExtractor, RecordExtractor};
pub use report::{QcSampler, ReportComposer};
pub use pipeline::{CertificatePipeline, GeneratedReport};
