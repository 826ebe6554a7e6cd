//! # pdf2docx
//!
//! Convert tabular PDF documents (payslips, invoices, forms) into editable
//! Word documents that keep their table layout and a light, consistent
//! styling: bold labels, shaded header rows, right-aligned amounts.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate path and %PDF magic
//!  ├─ 2. Read      glyph boxes and path segments via pdfium
//!  ├─ 3. Tables    pdfplumber: tight-lines → strict-lines → text, first multi-row hit wins
//!  ├─ 4. Assemble  company header, styled tables, special lines, footer
//!  └─ 5. Write     docx-rs, A4 with narrow margins, atomic rename
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2docx::{convert_sync, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = convert_sync("payslip.pdf", "payslip.docx", &ConversionConfig::default())?;
//!     for page in &report.pages {
//!         eprintln!("page {}: {} table(s)", page.page, page.tables.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without pdfium
//!
//! [`build_document`] runs the pipeline over any [`PageSource`] and
//! [`TableExtractor`], so pages can be described in memory with
//! [`PageContent`] and tables scripted per strategy.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2docx` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! ## pdfium
//!
//! pdfium is loaded at runtime. Pass an explicit library path via
//! [`ConversionConfigBuilder::pdfium_library_path`], or place the platform
//! library next to the executable or in the working directory; otherwise the
//! system loader is used.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod classify;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod style;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use classify::{classify_table, is_amount, is_header, HeaderMatcher, TableCategory};
pub use config::{
    ConversionConfig, ConversionConfigBuilder, FooterScope, PageLayout, PageSelection,
    SpecialLine, Typography, Vocabulary,
};
pub use convert::{build_document, convert_from_bytes, convert_sync, convert_to_file};
pub use document::{Cell, Document, Element, Paragraph, Run, Table};
pub use error::{ExtractError, Pdf2DocxError};
pub use model::{normalize_table, NormalizedTable, PageContent, RawTable};
pub use pipeline::extract::{ExtractionStrategy, GeometricExtractor, PageSource, TableExtractor};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{ConversionReport, PageReport, TableSummary};
pub use style::{style_cell, Alignment, CellContext, CellStyle, Shading};
