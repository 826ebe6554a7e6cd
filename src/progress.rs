//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline walks the selected pages.
//!
//! # Example
//!
//! ```rust
//! use pdf2docx::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct TableCounter {
//!     tables: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for TableCounter {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize, tables: usize) {
//!         self.tables.fetch_add(tables, Ordering::SeqCst);
//!         eprintln!("Page {}/{}: {} table(s)", page_num, total_pages, tables);
//!     }
//! }
//!
//! let counter = Arc::new(TableCounter { tables: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it processes each page.
///
/// Pages are processed sequentially, but the pipeline itself may run on a
/// blocking worker thread, so implementations must be `Send + Sync`. All
/// methods default to no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before the first page is read.
    ///
    /// # Arguments
    /// * `total_pages`: number of pages that will be processed
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called before table extraction starts on a page.
    ///
    /// # Arguments
    /// * `page_num`: 1-indexed page number in the source PDF
    /// * `total_pages`: number of pages being processed
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once a page's elements have been appended to the document.
    ///
    /// # Arguments
    /// * `page_num`: 1-indexed page number in the source PDF
    /// * `total_pages`: number of pages being processed
    /// * `tables`: tables emitted for this page
    fn on_page_complete(&self, page_num: usize, total_pages: usize, tables: usize) {
        let _ = (page_num, total_pages, tables);
    }

    /// Called once after the last page, before the document is written.
    fn on_conversion_complete(&self, total_pages: usize, total_tables: usize) {
        let _ = (total_pages, total_tables);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
