//! Error types for the tcert-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the tcert library.
#[derive(Error, Debug)]
pub enum TcertError {
    /// PDF decoding error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Report composition error.
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),

    /// Report rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while decoding the source PDF into lines.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to anchor-based field extraction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// An anchor was found too close to the end of the line sequence.
    #[error("anchor {anchor:?} at line {index} needs line +{offset}, but only {len} lines exist")]
    OutOfRange {
        anchor: &'static str,
        index: usize,
        offset: usize,
        len: usize,
    },
}

/// Errors raised while deriving the report record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    /// No product line item was extracted.
    #[error("no product line item found in document")]
    MissingProduct,

    /// The batch number line did not contain a `batch no: <digits>` code.
    #[error("could not parse batch code from {value:?}")]
    BatchParse { value: String },
}

/// Logo loading failures. These never abort rendering.
#[derive(Error, Debug)]
pub enum LogoError {
    /// The logo file does not exist.
    #[error("logo file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The logo file exists but could not be decoded.
    #[error("error loading logo {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// Errors raised by the PDF rendering backend.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to encode a content stream.
    #[error("failed to encode content stream: {0}")]
    Encode(String),

    /// Failed to serialize the finished document.
    #[error("failed to save PDF: {0}")]
    Save(String),
}

/// Result type for the tcert library.
pub type Result<T> = std::result::Result<T, TcertError>;
