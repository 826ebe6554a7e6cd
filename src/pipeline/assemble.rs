//! Document assembly: turns pages and their extracted tables into output
//! elements, in page order.
//!
//! Per page the order is fixed: page break (all but the first processed
//! page), company header (first processed page only), tables each followed
//! by a spacer, then special lines. The footer disclaimer is decided once
//! all pages are in.

use tracing::debug;

use super::extract::Extraction;
use crate::classify::{classify_table, HeaderMatcher, TableCategory};
use crate::config::{ConversionConfig, FooterScope, Typography, Vocabulary};
use crate::document::{Cell, Document, Element, Paragraph, Run, Table};
use crate::error::Pdf2DocxError;
use crate::model::{normalize_table, NormalizedTable, PageContent};
use crate::report::{PageReport, TableSummary};
use crate::style::{style_cell, Alignment, CellContext};

/// First line among the leading `company_scan_lines` lines of `text` that
/// contains a corporate suffix, trimmed.
pub fn find_company_header(text: &str, vocabulary: &Vocabulary) -> Option<String> {
    text.split('\n')
        .take(vocabulary.company_scan_lines)
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && vocabulary
                    .corporate_suffixes
                    .iter()
                    .any(|suffix| line.contains(suffix.as_str()))
        })
        .map(str::to_string)
}

/// For each special phrase, the first line of `text` containing it, trimmed.
/// Phrases that do not occur are skipped.
pub fn find_special_lines(text: &str, vocabulary: &Vocabulary) -> Vec<(usize, String)> {
    vocabulary
        .special_lines
        .iter()
        .enumerate()
        .filter(|(_, special)| !special.phrase.is_empty())
        .filter_map(|(i, special)| {
            text.split('\n')
                .find(|line| line.contains(special.phrase.as_str()))
                .map(|line| (i, line.trim().to_string()))
        })
        .collect()
}

/// Case-insensitive footer trigger check.
pub fn mentions_footer(text: &str, vocabulary: &Vocabulary) -> bool {
    let trigger = vocabulary.footer_trigger.to_lowercase();
    !trigger.is_empty() && text.to_lowercase().contains(&trigger)
}

/// Build a styled, rectangular table. Grid slots beyond a short row's end
/// stay as unstyled fillers.
pub fn build_table(
    table: &NormalizedTable,
    headers: &HeaderMatcher,
    typography: &Typography,
) -> Table {
    let category = table
        .rows
        .first()
        .map_or(TableCategory::Unknown, |row| classify_table(row));

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            (0..table.num_cols)
                .map(|j| match row.get(j) {
                    Some(value) => {
                        let text = value.as_deref().unwrap_or("").trim().to_string();
                        let style = style_cell(
                            CellContext {
                                row: i,
                                col: j,
                                num_cols: table.num_cols,
                                text: &text,
                            },
                            headers,
                            typography,
                        );
                        Cell {
                            text,
                            style: Some(style),
                        }
                    }
                    None => Cell::filler(),
                })
                .collect()
        })
        .collect();

    Table {
        rows,
        num_cols: table.num_cols,
        category,
    }
}

/// Whether the footer disclaimer goes out, and the company header used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblySummary {
    pub company_header: Option<String>,
    pub footer_emitted: bool,
}

/// Accumulates output elements page by page.
pub struct Assembler<'c> {
    config: &'c ConversionConfig,
    headers: HeaderMatcher,
    document: Document,
    pages_added: usize,
    company_header: Option<String>,
    footer_on_any_page: bool,
    footer_on_last_page: bool,
}

impl<'c> Assembler<'c> {
    pub fn new(config: &'c ConversionConfig) -> Result<Self, Pdf2DocxError> {
        Ok(Self {
            headers: config.vocabulary.header_matcher()?,
            document: Document::new(config.layout, config.typography.clone()),
            config,
            pages_added: 0,
            company_header: None,
            footer_on_any_page: false,
            footer_on_last_page: false,
        })
    }

    /// Append one page's elements.
    pub fn add_page(&mut self, page: &PageContent, extraction: &Extraction) -> PageReport {
        let config = self.config;
        let vocabulary = &config.vocabulary;
        let typography = &config.typography;
        let mut report = PageReport {
            page: page.index + 1,
            strategy: extraction.strategy.clone(),
            extraction_ms: extraction.elapsed_ms,
            ..PageReport::default()
        };

        if self.pages_added > 0 {
            self.document.push(Element::PageBreak);
        } else if let Some(line) = find_company_header(&page.text, vocabulary) {
            self.document.push_paragraph(
                Paragraph::from_run(Run::new(line.clone(), typography.company_header_size_pt).bold())
                    .align(Alignment::Right),
            );
            self.document.push_paragraph(Paragraph::blank());
            self.company_header = Some(line);
        }

        for raw in &extraction.tables {
            let Some(normalized) = normalize_table(raw) else {
                continue;
            };
            let table = build_table(&normalized, &self.headers, typography);
            debug!(
                page = report.page,
                category = %table.category,
                rows = normalized.num_rows,
                cols = normalized.num_cols,
                "table emitted"
            );
            report.tables.push(TableSummary {
                category: table.category,
                rows: normalized.num_rows,
                cols: normalized.num_cols,
            });
            self.document.push(Element::Table(table));
            self.document
                .push_paragraph(Paragraph::spacer(typography.table_gap_pt));
        }

        for (i, line) in find_special_lines(&page.text, vocabulary) {
            let special = &vocabulary.special_lines[i];
            let mut run = Run::new(line.clone(), special.size_pt);
            run.bold = special.bold;
            self.document.push_paragraph(Paragraph::from_run(run));
            report.special_lines.push(line);
        }

        let mentions = mentions_footer(&page.text, vocabulary);
        self.footer_on_any_page |= mentions;
        self.footer_on_last_page = mentions;
        self.pages_added += 1;

        report
    }

    /// Append the footer if it applies and hand back the document.
    pub fn finish(mut self) -> (Document, AssemblySummary) {
        let emit_footer = match self.config.footer_scope {
            FooterScope::LastPage => self.footer_on_last_page,
            FooterScope::AnyPage => self.footer_on_any_page,
        };
        if emit_footer {
            let text = self.config.vocabulary.footer_text.clone();
            self.document.push_paragraph(Paragraph::from_run(
                Run::new(text, self.config.typography.footer_size_pt).italic(),
            ));
        }

        (
            self.document,
            AssemblySummary {
                company_header: self.company_header,
                footer_emitted: emit_footer,
            },
        )
    }
}
