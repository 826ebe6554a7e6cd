//! Input-side data: what the PDF backend hands to the pipeline per page, and
//! the normalised table shape the styling stage works on.

use pdfplumber::Page;
use pdfplumber_core::{Char, Line, Rect};

/// A table as extracted: rows of nullable cell strings. Row lengths may
/// differ.
pub type RawTable = Vec<Vec<Option<String>>>;

/// Everything the pipeline needs to know about one input page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// 0-based page index in the source document.
    pub index: usize,
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Plain page text, lines separated by `\n`.
    pub text: String,
    /// Positioned characters, top-left origin.
    pub chars: Vec<Char>,
    /// Straight horizontal and vertical path segments, top-left origin.
    pub lines: Vec<Line>,
    /// Axis-aligned rectangles from path objects, top-left origin.
    pub rects: Vec<Rect>,
}

impl PageContent {
    /// A page with text only, no geometry. Mostly useful in tests.
    pub fn from_text(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Ruling edges the lattice strategies would intersect: one per line,
    /// four per rectangle.
    pub fn edge_count(&self) -> usize {
        self.lines.len() + 4 * self.rects.len()
    }

    /// The page as `pdfplumber` sees it, for table finding and text layout.
    pub fn to_plumber_page(&self) -> Page {
        Page::with_geometry(
            self.index,
            self.width,
            self.height,
            self.chars.clone(),
            self.lines.clone(),
            self.rects.clone(),
            Vec::new(),
        )
    }
}

/// A table ready for rendering: blank rows removed, rectangular bounds known.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub rows: Vec<Vec<Option<String>>>,
    pub num_rows: usize,
    pub num_cols: usize,
}

fn is_blank(cell: &Option<String>) -> bool {
    cell.as_deref().map_or(true, |t| t.trim().is_empty())
}

/// Drop rows without any non-blank cell and measure what is left.
///
/// Returns `None` when nothing renderable remains, in which case the table
/// must be skipped entirely.
pub fn normalize_table(raw: &RawTable) -> Option<NormalizedTable> {
    let rows: Vec<Vec<Option<String>>> = raw
        .iter()
        .filter(|row| row.iter().any(|cell| !is_blank(cell)))
        .cloned()
        .collect();

    let num_rows = rows.len();
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_rows == 0 || num_cols == 0 {
        return None;
    }

    Some(NormalizedTable {
        rows,
        num_rows,
        num_cols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn blank_rows_are_dropped() {
        let raw = vec![
            cells(&[Some("Earnings"), Some("Amount")]),
            cells(&[None, Some("   ")]),
            cells(&[Some("Basic"), Some("10,000.00"), Some("")]),
            vec![],
        ];
        let table = normalize_table(&raw).unwrap();
        assert_eq!(table.num_rows, 2);
        assert_eq!(table.num_cols, 3);
        assert_eq!(table.rows[1][0].as_deref(), Some("Basic"));
    }

    #[test]
    fn all_blank_table_is_skipped() {
        let raw = vec![
            cells(&[None, Some(" ")]),
            cells(&[Some("\t"), Some("")]),
        ];
        assert_eq!(normalize_table(&raw), None);
        assert_eq!(normalize_table(&Vec::new()), None);
    }
}
