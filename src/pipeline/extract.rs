//! Table extraction with strategy fallback.
//!
//! Two seams keep the pipeline independent of pdfium: a [`PageSource`]
//! yields [`PageContent`] per page, and a [`TableExtractor`] turns a page
//! plus one [`ExtractionStrategy`] into raw tables. Tests drive the pipeline
//! with in-memory implementations of both.

use pdfplumber_core::{Strategy, TableSettings};
use std::time::Instant;
use tracing::debug;

use crate::error::{ExtractError, Pdf2DocxError};
use crate::model::{PageContent, RawTable};

/// Ruling edges above which a lattice strategy refuses a page.
pub const DEFAULT_MAX_EDGES: usize = 4000;

/// A document whose pages can be read one at a time.
pub trait PageSource {
    /// Pages in the document.
    fn page_count(&self) -> usize;

    /// Read the page at 0-based `index`.
    fn page(&self, index: usize) -> Result<PageContent, Pdf2DocxError>;
}

/// Finds tables on a page under one strategy configuration.
pub trait TableExtractor {
    fn extract_tables(
        &self,
        page: &PageContent,
        strategy: &ExtractionStrategy,
    ) -> Result<Vec<RawTable>, ExtractError>;
}

/// One named `pdfplumber` table-finder configuration.
#[derive(Debug, Clone)]
pub struct ExtractionStrategy {
    /// Name used in logs and the conversion report.
    pub name: String,
    pub settings: TableSettings,
    /// Pages with more ruling edges than this fail the strategy instead of
    /// running the intersection search. Ignored by text alignment.
    pub max_edges: usize,
}

impl ExtractionStrategy {
    pub fn new(name: impl Into<String>, settings: TableSettings) -> Self {
        Self {
            name: name.into(),
            settings,
            max_edges: DEFAULT_MAX_EDGES,
        }
    }

    /// Ruling lines and rectangle sides, snapped at 3pt.
    pub fn tight_lines() -> Self {
        Self::new(
            "tight-lines",
            TableSettings {
                strategy: Strategy::Lattice,
                snap_tolerance: 3.0,
                ..TableSettings::default()
            },
        )
    }

    /// Ruling lines only; filled or stroked rectangles are ignored.
    pub fn strict_lines() -> Self {
        Self::new(
            "strict-lines",
            TableSettings {
                strategy: Strategy::LatticeStrict,
                ..TableSettings::default()
            },
        )
    }

    /// Column and row boundaries inferred from word alignment, snapped at 5pt.
    pub fn text() -> Self {
        Self::new(
            "text",
            TableSettings {
                strategy: Strategy::Stream,
                snap_tolerance: 5.0,
                ..TableSettings::default()
            },
        )
    }

    /// tight-lines, then strict-lines, then text.
    pub fn fallback_chain() -> Vec<Self> {
        vec![Self::tight_lines(), Self::strict_lines(), Self::text()]
    }

    fn uses_rulings(&self) -> bool {
        !matches!(self.settings.strategy, Strategy::Stream)
    }
}

/// The `pdfplumber` table finder over the page's glyphs and rulings.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricExtractor;

impl TableExtractor for GeometricExtractor {
    fn extract_tables(
        &self,
        page: &PageContent,
        strategy: &ExtractionStrategy,
    ) -> Result<Vec<RawTable>, ExtractError> {
        if strategy.uses_rulings() {
            let edges = page.edge_count();
            if edges > strategy.max_edges {
                return Err(ExtractError::TooManyEdges {
                    page: page.index + 1,
                    strategy: strategy.name.clone(),
                    edges,
                    limit: strategy.max_edges,
                });
            }
        }
        Ok(page.to_plumber_page().extract_tables(&strategy.settings))
    }
}
/// Result of running the strategy list on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Tables from the accepted strategy; empty when none was accepted.
    pub tables: Vec<RawTable>,
    /// Name of the accepted strategy.
    pub strategy: Option<String>,
    pub elapsed_ms: u64,
}

/// A strategy's output is usable once some table has more than one row.
fn is_acceptable(tables: &[RawTable]) -> bool {
    tables.iter().any(|t| t.len() > 1)
}

/// Try `strategies` in order and keep the first acceptable result.
///
/// A failing strategy counts as "no tables" and the next one is tried. When
/// no strategy is accepted the page gets no tables at all.
pub fn extract_with_fallback<E>(
    extractor: &E,
    page: &PageContent,
    strategies: &[ExtractionStrategy],
) -> Extraction
where
    E: TableExtractor + ?Sized,
{
    let started = Instant::now();

    for strategy in strategies {
        match extractor.extract_tables(page, strategy) {
            Ok(found) if is_acceptable(&found) => {
                debug!(
                    page = page.index + 1,
                    strategy = %strategy.name,
                    tables = found.len(),
                    "strategy accepted"
                );
                return Extraction {
                    tables: found,
                    strategy: Some(strategy.name.clone()),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                };
            }
            Ok(found) => {
                debug!(
                    page = page.index + 1,
                    strategy = %strategy.name,
                    tables = found.len(),
                    "strategy found no multi-row table"
                );
            }
            Err(e) => {
                debug!(page = page.index + 1, strategy = %strategy.name, "strategy failed: {e}");
            }
        }
    }

    Extraction {
        elapsed_ms: started.elapsed().as_millis() as u64,
        ..Extraction::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::geometry::{glyph, shapes_from_path, PathPaint, PathPoint};
    use pdfplumber_core::{BBox, Char};
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn table(rows: &[&[&str]]) -> RawTable {
        rows.iter()
            .map(|r| r.iter().map(|c| Some(c.to_string())).collect())
            .collect()
    }

    /// Returns canned results per strategy name and records the call order.
    #[derive(Default)]
    struct Scripted {
        results: HashMap<String, Result<Vec<RawTable>, ExtractError>>,
        calls: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn with(mut self, name: &str, result: Result<Vec<RawTable>, ExtractError>) -> Self {
            self.results.insert(name.to_string(), result);
            self
        }
    }

    impl TableExtractor for Scripted {
        fn extract_tables(
            &self,
            _page: &PageContent,
            strategy: &ExtractionStrategy,
        ) -> Result<Vec<RawTable>, ExtractError> {
            self.calls.borrow_mut().push(strategy.name.clone());
            self.results
                .get(&strategy.name)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn edge_error(strategy: &str) -> ExtractError {
        ExtractError::TooManyEdges {
            page: 1,
            strategy: strategy.to_string(),
            edges: 9_000,
            limit: DEFAULT_MAX_EDGES,
        }
    }

    #[test]
    fn first_acceptable_strategy_wins() {
        let extractor = Scripted::default()
            .with("tight-lines", Ok(vec![table(&[&["A", "B"], &["1", "2"]])]))
            .with("text", Ok(vec![table(&[&["x"], &["y"]])]));
        let result =
            extract_with_fallback(&extractor, &PageContent::default(), &ExtractionStrategy::fallback_chain());
        assert_eq!(result.strategy.as_deref(), Some("tight-lines"));
        assert_eq!(result.tables.len(), 1);
        assert_eq!(*extractor.calls.borrow(), vec!["tight-lines"]);
    }

    #[test]
    fn single_row_tables_fall_through() {
        let extractor = Scripted::default()
            .with("tight-lines", Ok(vec![table(&[&["Only", "Header"]])]))
            .with("strict-lines", Ok(vec![table(&[&["A"], &["1"]])]));
        let result =
            extract_with_fallback(&extractor, &PageContent::default(), &ExtractionStrategy::fallback_chain());
        assert_eq!(result.strategy.as_deref(), Some("strict-lines"));
        assert_eq!(result.tables, vec![table(&[&["A"], &["1"]])]);
    }

    #[test]
    fn errors_are_isolated_per_strategy() {
        let extractor = Scripted::default()
            .with("tight-lines", Err(edge_error("tight-lines")))
            .with("strict-lines", Err(edge_error("strict-lines")))
            .with("text", Ok(vec![table(&[&["A"], &["1"]])]));
        let result =
            extract_with_fallback(&extractor, &PageContent::default(), &ExtractionStrategy::fallback_chain());
        assert_eq!(result.strategy.as_deref(), Some("text"));
        assert_eq!(extractor.calls.borrow().len(), 3);
    }

    #[test]
    fn nothing_accepted_means_no_tables() {
        let extractor = Scripted::default()
            .with("tight-lines", Ok(vec![table(&[&["A", "B"]])]))
            .with("text", Err(edge_error("text")));
        let result =
            extract_with_fallback(&extractor, &PageContent::default(), &ExtractionStrategy::fallback_chain());
        assert!(result.tables.is_empty());
        assert_eq!(result.strategy, None);
    }


    fn word(text: &str, x: f64, top: f64) -> Vec<Char> {
        text.chars()
            .enumerate()
            .map(|(i, c)| {
                let x0 = x + i as f64 * 6.0;
                glyph(c.to_string(), BBox::new(x0, top, x0 + 6.0, top + 10.0), "Helvetica", 10.0)
            })
            .collect()
    }

    /// Two rows, two columns, every ruling in one stroked path object.
    fn ruled_page() -> PageContent {
        let mut points = Vec::new();
        for y in [100.0, 120.0, 140.0] {
            points.push(PathPoint::move_to(50.0, y));
            points.push(PathPoint::line_to(350.0, y));
        }
        for x in [50.0, 200.0, 350.0] {
            points.push(PathPoint::move_to(x, 100.0));
            points.push(PathPoint::line_to(x, 140.0));
        }
        let shapes = shapes_from_path(
            &points,
            PathPaint {
                line_width: 0.5,
                stroke: true,
                fill: false,
            },
        );

        let mut chars = word("Code", 60.0, 105.0);
        chars.extend(word("Name", 210.0, 105.0));
        chars.extend(word("E100", 60.0, 125.0));
        chars.extend(word("Jane", 210.0, 125.0));

        PageContent {
            index: 0,
            width: 595.0,
            height: 842.0,
            text: "Code Name\nE100 Jane".into(),
            chars,
            lines: shapes.lines,
            rects: shapes.rects,
        }
    }

    #[test]
    fn text_only_page_has_no_ruled_tables() {
        let tables = GeometricExtractor
            .extract_tables(&PageContent::from_text(0, "no geometry"), &ExtractionStrategy::tight_lines())
            .unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn grid_drawn_as_one_path_yields_a_two_row_table() {
        let tables = GeometricExtractor
            .extract_tables(&ruled_page(), &ExtractionStrategy::tight_lines())
            .unwrap();
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.len(), 2);
        assert_eq!(table[0][0].as_deref(), Some("Code"));
        assert_eq!(table[1][1].as_deref(), Some("Jane"));
    }

    #[test]
    fn too_many_edges_fails_lattice_but_not_text() {
        let mut page = ruled_page();
        let strategy = ExtractionStrategy {
            max_edges: 4,
            ..ExtractionStrategy::tight_lines()
        };
        let err = GeometricExtractor.extract_tables(&page, &strategy).unwrap_err();
        assert_eq!(
            err,
            ExtractError::TooManyEdges {
                page: 1,
                strategy: "tight-lines".into(),
                edges: 6,
                limit: 4,
            }
        );

        page.lines.clear();
        let text = ExtractionStrategy {
            max_edges: 0,
            ..ExtractionStrategy::text()
        };
        assert!(GeometricExtractor.extract_tables(&page, &text).is_ok());
    }

    #[test]
    fn fallback_chain_maps_to_plumber_strategies() {
        let chain = ExtractionStrategy::fallback_chain();
        let names: Vec<&str> = chain.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["tight-lines", "strict-lines", "text"]);
        assert!(matches!(chain[0].settings.strategy, Strategy::Lattice));
        assert_eq!(chain[0].settings.snap_tolerance, 3.0);
        assert!(matches!(chain[1].settings.strategy, Strategy::LatticeStrict));
        assert!(matches!(chain[2].settings.strategy, Strategy::Stream));
        assert_eq!(chain[2].settings.snap_tolerance, 5.0);
    }
}
