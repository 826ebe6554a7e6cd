//! Per-cell styling decision.
//!
//! [`style_cell`] is a pure function of the cell's position, the table width
//! and the cell text. It returns a [`CellStyle`] descriptor; turning that into
//! document markup is [`crate::pipeline::write`]'s job.

use serde::{Deserialize, Serialize};

use crate::classify::{is_amount, HeaderMatcher};
use crate::config::Typography;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Cell background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Header row.
    LightGreen,
    /// Keyword cells outside the header row.
    LightGray,
}

impl Shading {
    /// Fill colour as a hex RGB string.
    pub fn fill(&self) -> &'static str {
        match self {
            Shading::LightGreen => "E2EFDA",
            Shading::LightGray => "F5F5F5",
        }
    }
}

/// How one table cell is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub bold: bool,
    pub alignment: Alignment,
    pub shading: Option<Shading>,
    pub font_size_pt: f32,
}

/// Where a cell sits and what it holds.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub row: usize,
    pub col: usize,
    pub num_cols: usize,
    pub text: &'a str,
}

/// Label cells live in the first column, or in the third column of a
/// four-column (two label/value pairs) table.
fn is_label_column(col: usize, num_cols: usize) -> bool {
    col == 0 || (col == 2 && num_cols == 4)
}

/// Decide the style of one cell.
///
/// * bold: first row, label column holding non-numeric text, or a header
///   keyword anywhere
/// * right-aligned: amount-looking text
/// * shading: light green on the first row, light gray on other header cells
/// * size: the dense size once the table has more than
///   [`Typography::dense_table_columns`] columns
pub fn style_cell(cell: CellContext<'_>, headers: &HeaderMatcher, typography: &Typography) -> CellStyle {
    let is_first_row = cell.row == 0;
    let is_label_col = is_label_column(cell.col, cell.num_cols);
    let is_numeric = is_amount(cell.text);
    let is_header = headers.is_header(cell.text);

    let shading = if is_first_row {
        Some(Shading::LightGreen)
    } else if is_header {
        Some(Shading::LightGray)
    } else {
        None
    };

    CellStyle {
        bold: is_first_row || (is_label_col && !is_numeric) || is_header,
        alignment: if is_numeric {
            Alignment::Right
        } else {
            Alignment::Left
        },
        shading,
        font_size_pt: if cell.num_cols > typography.dense_table_columns {
            typography.dense_cell_size_pt
        } else {
            typography.cell_size_pt
        },
    }
}
