//! Output document model.
//!
//! The assembly stage builds a [`Document`], a flat list of paragraphs,
//! tables and page breaks in emission order. It is independent of the Word
//! writer, which makes it easy to inspect in tests; [`crate::pipeline::write`]
//! turns it into `docx-rs` markup.

use crate::classify::TableCategory;
use crate::config::{PageLayout, Typography};
use crate::style::{Alignment, CellStyle};

/// A run of uniformly formatted text. The font family comes from the
/// document's [`Typography`].
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size_pt: f32,
}

impl Run {
    pub fn new(text: impl Into<String>, size_pt: f32) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            size_pt,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Option<Alignment>,
    pub space_after_pt: Option<f32>,
}

impl Paragraph {
    /// An empty paragraph.
    pub fn blank() -> Self {
        Self::default()
    }

    /// An empty paragraph with trailing space, used after tables.
    pub fn spacer(after_pt: f32) -> Self {
        Self {
            space_after_pt: Some(after_pt),
            ..Self::default()
        }
    }

    pub fn from_run(run: Run) -> Self {
        Self {
            runs: vec![run],
            ..Self::default()
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// One table cell. `style` is `None` for grid slots the source row did not
/// reach; those are rendered empty and unstyled.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub style: Option<CellStyle>,
}

impl Cell {
    pub fn filler() -> Self {
        Self {
            text: String::new(),
            style: None,
        }
    }
}

/// A rectangular table: every row holds exactly `num_cols` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    pub num_cols: usize,
    pub category: TableCategory,
}

impl Table {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

/// The assembled document, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub layout: PageLayout,
    pub typography: Typography,
    pub elements: Vec<Element>,
}

impl Document {
    pub fn new(layout: PageLayout, typography: Typography) -> Self {
        Self {
            layout,
            typography,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.elements.push(Element::Paragraph(paragraph));
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.elements.iter().filter_map(|e| match e {
            Element::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.elements.iter().filter_map(|e| match e {
            Element::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn page_breaks(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::PageBreak))
            .count()
    }
}
