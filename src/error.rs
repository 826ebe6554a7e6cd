//! Error types for the pdf2docx library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2DocxError`] is **fatal**: the conversion cannot proceed at all
//!   (bad input file, wrong password, pdfium missing, output not writable).
//!   Returned as `Err(Pdf2DocxError)` from every `convert*` entry point.
//!
//! * [`ExtractError`] is **non-fatal**: one table-extraction strategy failed
//!   on one page. The pipeline treats it as "no tables under this strategy"
//!   and moves on to the next strategy, so it never reaches the caller.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2docx library.
#[derive(Debug, Error)]
pub enum Pdf2DocxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The page selection matched no page of the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// pdfium-render failed while reading a page's text or objects.
    #[error("Failed to read page {page}: {detail}")]
    PageReadFailed { page: usize, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output Word document.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// docx-rs could not package the document archive.
    #[error("Failed to package Word document '{path}': {detail}")]
    DocxPackFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDFium must be available as a shared library. You can:\n\
  • Place libpdfium next to the pdf2docx executable or in the working directory.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (or pass --pdfium-lib).\n\
  • Install pdfium system-wide so the dynamic loader can find it.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal failure of one extraction strategy on one page.
///
/// Produced by [`crate::pipeline::extract::TableExtractor`] implementations
/// and swallowed by the strategy fallback loop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The page has so many ruling edges that intersecting them would be
    /// quadratic blow-up (usually a hatched background or a vector drawing).
    #[error("Page {page}: {edges} edges exceed the limit of {limit} for strategy '{strategy}'")]
    TooManyEdges {
        page: usize,
        strategy: String,
        edges: usize,
        limit: usize,
    },
}
