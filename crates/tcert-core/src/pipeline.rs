//! End-to-end decode, extract, compose and render for one document.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::rngs::ThreadRng;
use tracing::{debug, info};

use crate::error::{LogoError, Result};
use crate::invoice::{AnchorExtractor, RecordExtractor};
use crate::models::config::TcertConfig;
use crate::models::record::ExtractedRecord;
use crate::models::report::{ReportRecord, REPORT_MIME};
use crate::pdf::{PdfReportRenderer, PdfTextDecoder, ReportRenderer, TextDecoder};
use crate::report::{QcSampler, ReportComposer, UniformQcSampler};

/// A rendered certificate ready to be offered for download.
#[derive(Debug)]
pub struct GeneratedReport {
    /// Synthesized download name.
    pub file_name: String,
    /// Always `application/pdf`.
    pub mime: &'static str,
    /// Values printed on the certificate.
    pub report: ReportRecord,
    /// PDF bytes.
    pub bytes: Vec<u8>,
    /// Recoverable logo problems.
    pub diagnostics: Vec<LogoError>,
}

/// Runs the whole certificate pipeline. Each call is independent.
#[derive(Debug)]
pub struct CertificatePipeline<S = UniformQcSampler<ThreadRng>> {
    decoder: PdfTextDecoder,
    extractor: AnchorExtractor,
    composer: ReportComposer<S>,
    renderer: PdfReportRenderer,
    logo_path: Option<PathBuf>,
}

impl CertificatePipeline {
    /// Pipeline using the configured QC ranges and logo.
    pub fn from_config(config: &TcertConfig) -> Result<Self> {
        let composer = ReportComposer::with_ranges(config.qc)?;
        Ok(Self::with_composer(composer).with_logo(config.report.logo_path.clone()))
    }
}

impl<S: QcSampler> CertificatePipeline<S> {
    pub fn with_composer(composer: ReportComposer<S>) -> Self {
        Self {
            decoder: PdfTextDecoder::new(),
            extractor: AnchorExtractor::new(),
            composer,
            renderer: PdfReportRenderer::new(),
            logo_path: None,
        }
    }

    /// Set or clear the logo drawn on generated reports.
    pub fn with_logo(mut self, logo_path: Option<PathBuf>) -> Self {
        self.logo_path = logo_path;
        self
    }

    pub fn logo_path(&self) -> Option<&Path> {
        self.logo_path.as_deref()
    }

    /// Decode and extract fields without composing a report.
    pub fn extract(&self, data: &[u8]) -> Result<ExtractedRecord> {
        let lines = self.decoder.decode_to_lines(data)?;
        Ok(self.extractor.extract(&lines)?)
    }

    /// Derive the report record from extracted fields.
    pub fn compose(&mut self, record: &ExtractedRecord) -> Result<ReportRecord> {
        Ok(self.composer.compose(record)?)
    }

    /// Compose and render a certificate from already extracted fields.
    pub fn generate_from_record(&mut self, record: &ExtractedRecord) -> Result<GeneratedReport> {
        let report = self.compose(record)?;
        let document = self.composer.document(&report);
        let rendered = self.renderer.render(&document, self.logo_path.as_deref())?;

        Ok(GeneratedReport {
            file_name: report.file_name(),
            mime: REPORT_MIME,
            report,
            bytes: rendered.bytes,
            diagnostics: rendered.diagnostics,
        })
    }

    /// Run the full pipeline over a source PDF.
    pub fn generate(&mut self, data: &[u8]) -> Result<GeneratedReport> {
        let start = Instant::now();

        let record = self.extract(data)?;
        debug!("Extracted record: {:?}", record);

        let generated = self.generate_from_record(&record)?;
        info!(
            "Generated {} ({} bytes) in {:?}",
            generated.file_name,
            generated.bytes.len(),
            start.elapsed()
        );

        Ok(generated)
    }
}
