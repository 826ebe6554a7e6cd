//! Conversion entry points.
//!
//! [`build_document`] is the whole pipeline over abstract collaborators; the
//! `convert*` functions wire it to pdfium and the Word writer. pdfium is not
//! async-safe, so the async entry points move the blocking pipeline onto
//! `tokio::task::spawn_blocking`. Pages are always processed sequentially.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{ConversionConfig, PageSelection};
use crate::document::Document;
use crate::error::Pdf2DocxError;
use crate::pipeline::assemble::Assembler;
use crate::pipeline::extract::{extract_with_fallback, GeometricExtractor, PageSource, TableExtractor};
use crate::pipeline::{input, pdf, write};
use crate::progress::{NoopProgressCallback, ProgressCallback};
use crate::report::ConversionReport;

/// Run the pipeline over `source`, returning the assembled document and a
/// report of what was emitted.
///
/// # Errors
/// [`Pdf2DocxError::PageOutOfRange`] when the page selection matches no
/// page, or whatever the source returns for an unreadable page. Table
/// extraction failures are never errors.
pub fn build_document<S, E>(
    source: &S,
    extractor: &E,
    config: &ConversionConfig,
) -> Result<(Document, ConversionReport), Pdf2DocxError>
where
    S: PageSource + ?Sized,
    E: TableExtractor + ?Sized,
{
    let started = Instant::now();

    // ── Step 1: Compute page indices ─────────────────────────────────────
    let total_pages = source.page_count();
    let page_indices = config.pages.to_indices(total_pages);
    if page_indices.is_empty() {
        return Err(Pdf2DocxError::PageOutOfRange {
            page: first_requested_page(&config.pages),
            total: total_pages,
        });
    }
    debug!("Selected {} of {} pages", page_indices.len(), total_pages);

    let progress: ProgressCallback = config
        .progress_callback
        .clone()
        .unwrap_or_else(|| Arc::new(NoopProgressCallback));
    progress.on_conversion_start(page_indices.len());

    // ── Step 2: Extract and assemble page by page ────────────────────────
    let mut assembler = Assembler::new(config)?;
    let mut report = ConversionReport {
        total_pages,
        processed_pages: page_indices.len(),
        ..ConversionReport::default()
    };

    for &idx in &page_indices {
        progress.on_page_start(idx + 1, page_indices.len());

        let page = source.page(idx)?;
        let extraction = extract_with_fallback(extractor, &page, &config.strategies);
        let page_report = assembler.add_page(&page, &extraction);

        info!(
            page = idx + 1,
            strategy = page_report.strategy.as_deref().unwrap_or("none"),
            tables = page_report.tables.len(),
            special_lines = page_report.special_lines.len(),
            "page converted"
        );
        progress.on_page_complete(idx + 1, page_indices.len(), page_report.tables.len());
        report.pages.push(page_report);
    }

    // ── Step 3: Footer ───────────────────────────────────────────────────
    let (document, summary) = assembler.finish();
    report.company_header = summary.company_header;
    report.footer_emitted = summary.footer_emitted;
    report.total_duration_ms = started.elapsed().as_millis() as u64;

    progress.on_conversion_complete(page_indices.len(), report.total_tables());
    Ok((document, report))
}

/// Convert a PDF file to a Word document, blocking the calling thread.
///
/// # Errors
/// Returns `Err(Pdf2DocxError)` for every fatal condition:
/// - input missing, unreadable or not a PDF
/// - pdfium library unavailable
/// - password required / wrong, document corrupt
/// - output cannot be written
pub fn convert_sync(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2DocxError> {
    let total_start = Instant::now();
    let output_path = output_path.as_ref();
    info!("Starting conversion: {}", input_path.as_ref().display());

    let pdf_path = input::resolve_input(input_path.as_ref())?;
    let pdfium = pdf::bind_pdfium(config.pdfium_library_path.as_deref())?;
    let source = pdf::PdfiumSource::open(&pdfium, &pdf_path, config.password.as_deref())?;

    let (document, mut report) = build_document(&source, &GeometricExtractor, config)?;
    write::save(&document, output_path)?;

    report.input = Some(pdf_path);
    report.output = Some(output_path.to_path_buf());
    report.total_duration_ms = total_start.elapsed().as_millis() as u64;
    info!(
        "Converted {} page(s), {} table(s) in {}ms",
        report.processed_pages,
        report.total_tables(),
        report.total_duration_ms
    );
    Ok(report)
}

/// Convert a PDF file to a Word document on the blocking thread pool.
///
/// # Example
/// ```rust,no_run
/// use pdf2docx::{convert_to_file, ConversionConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = convert_to_file("payslip.pdf", "payslip.docx", &ConversionConfig::default()).await?;
/// println!("{} tables", report.total_tables());
/// # Ok(())
/// # }
/// ```
pub async fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2DocxError> {
    let input_path: PathBuf = input_path.as_ref().to_path_buf();
    let output_path: PathBuf = output_path.as_ref().to_path_buf();
    let config = config.clone();

    tokio::task::spawn_blocking(move || convert_sync(&input_path, &output_path, &config))
        .await
        .map_err(|e| Pdf2DocxError::Internal(format!("Conversion task panicked: {e}")))?
}

/// Convert PDF bytes held in memory.
///
/// The bytes are written to a managed [`tempfile`] that is removed on
/// return. The report's `input` is left empty.
pub async fn convert_from_bytes(
    bytes: &[u8],
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, Pdf2DocxError> {
    let mut tmp = tempfile::NamedTempFile::new()
        .map_err(|e| Pdf2DocxError::Internal(format!("tempfile: {e}")))?;
    tmp.write_all(bytes)
        .map_err(|e| Pdf2DocxError::Internal(format!("tempfile write: {e}")))?;

    // `tmp` lives until the conversion returns
    let mut report = convert_to_file(tmp.path(), output_path, config).await?;
    report.input = None;
    Ok(report)
}

fn first_requested_page(selection: &PageSelection) -> usize {
    match selection {
        PageSelection::All => 1,
        PageSelection::Single(p) => *p,
        PageSelection::Range(start, _) => *start,
        PageSelection::Set(pages) => pages.iter().copied().min().unwrap_or(0),
    }
}
