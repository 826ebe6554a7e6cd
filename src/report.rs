//! Conversion report: what was found on each page and what was emitted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classify::TableCategory;

/// Shape and category of one emitted table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub category: TableCategory,
    pub rows: usize,
    pub cols: usize,
}

/// Per-page outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    /// 1-indexed page number in the source PDF.
    pub page: usize,
    /// Name of the strategy whose tables were used, if any strategy produced
    /// a table with more than one row.
    pub strategy: Option<String>,
    /// Tables emitted for this page, in order.
    pub tables: Vec<TableSummary>,
    /// Special lines emitted for this page, in order.
    pub special_lines: Vec<String>,
    /// Wall-clock time spent on table extraction.
    pub extraction_ms: u64,
}

/// Summary of a whole conversion. Serialised as JSON by the CLI's
/// `--report` option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Pages in the source PDF.
    pub total_pages: usize,
    /// Pages processed after applying the page selection.
    pub processed_pages: usize,
    pub company_header: Option<String>,
    pub footer_emitted: bool,
    pub pages: Vec<PageReport>,
    pub total_duration_ms: u64,
}

impl ConversionReport {
    pub fn total_tables(&self) -> usize {
        self.pages.iter().map(|p| p.tables.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
