//! Word output: renders a [`Document`] with `docx-rs` and saves it
//! atomically.

use docx_rs::{
    AlignmentType, BorderType, BreakType, Docx, LineSpacing, PageMargin, RunFonts,
    TableAlignmentType, TableBorder, TableBorderPosition, TableBorders, TableCell, TableRow,
};
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

use crate::config::Typography;
use crate::document::{Cell, Document, Element, Paragraph, Run, Table};
use crate::error::Pdf2DocxError;
use crate::style::Alignment;

/// Points to half-points, the unit of `w:sz`.
fn half_points(pt: f32) -> usize {
    (pt * 2.0).round() as usize
}

/// Points to twips, the unit of paragraph spacing.
fn twips(pt: f32) -> u32 {
    (pt * 20.0).round() as u32
}

fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Right => AlignmentType::Right,
    }
}

fn fonts(typography: &Typography) -> RunFonts {
    let family = typography.font_family.as_str();
    RunFonts::new()
        .ascii(family)
        .hi_ansi(family)
        .east_asia(family)
        .cs(family)
}

/// One run; `\n` in the text becomes a line break.
fn render_run(run: &Run, typography: &Typography) -> docx_rs::Run {
    let mut out = docx_rs::Run::new()
        .size(half_points(run.size_pt))
        .fonts(fonts(typography));
    if run.bold {
        out = out.bold();
    }
    if run.italic {
        out = out.italic();
    }
    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            out = out.add_break(BreakType::TextWrapping);
        }
        out = out.add_text(line);
    }
    out
}

fn render_paragraph(paragraph: &Paragraph, typography: &Typography) -> docx_rs::Paragraph {
    let mut out = docx_rs::Paragraph::new();
    for run in &paragraph.runs {
        out = out.add_run(render_run(run, typography));
    }
    if let Some(alignment) = paragraph.alignment {
        out = out.align(alignment_type(alignment));
    }
    if let Some(after) = paragraph.space_after_pt {
        out = out.line_spacing(LineSpacing::new().after(twips(after)));
    }
    out
}

fn render_cell(cell: &Cell, typography: &Typography) -> TableCell {
    let Some(style) = cell.style else {
        return TableCell::new().add_paragraph(docx_rs::Paragraph::new());
    };

    let spacing = twips(typography.cell_spacing_pt);
    let mut paragraph = docx_rs::Paragraph::new()
        .line_spacing(LineSpacing::new().before(spacing).after(spacing));
    if !cell.text.is_empty() {
        let mut run = Run::new(cell.text.clone(), style.font_size_pt);
        run.bold = style.bold;
        paragraph = paragraph.add_run(render_run(&run, typography));
    }
    if style.alignment != Alignment::Left {
        paragraph = paragraph.align(alignment_type(style.alignment));
    }

    let mut out = TableCell::new().add_paragraph(paragraph);
    if let Some(shading) = style.shading {
        out = out.shading(docx_rs::Shading::new().fill(shading.fill()));
    }
    out
}

fn borders(typography: &Typography) -> TableBorders {
    [
        TableBorderPosition::Top,
        TableBorderPosition::Left,
        TableBorderPosition::Bottom,
        TableBorderPosition::Right,
        TableBorderPosition::InsideH,
        TableBorderPosition::InsideV,
    ]
    .into_iter()
    .fold(TableBorders::new(), |acc, position| {
        acc.set(
            TableBorder::new(position)
                .border_type(BorderType::Single)
                .size(typography.border_size)
                .color(typography.border_color.as_str()),
        )
    })
}

fn render_table(table: &Table, content_width: u32, typography: &Typography) -> docx_rs::Table {
    let rows: Vec<TableRow> = table
        .rows
        .iter()
        .map(|row| TableRow::new(row.iter().map(|c| render_cell(c, typography)).collect()))
        .collect();
    let column_width = content_width as usize / table.num_cols.max(1);

    docx_rs::Table::new(rows)
        .set_grid(vec![column_width; table.num_cols])
        .align(TableAlignmentType::Center)
        .set_borders(borders(typography))
}

/// Render `document` into a `docx-rs` document: A4 section geometry,
/// then every element in order.
pub fn to_docx(document: &Document) -> Docx {
    let layout = &document.layout;
    let typography = &document.typography;

    let mut docx = Docx::new()
        .page_size(layout.width, layout.height)
        .page_margin(
            PageMargin::new()
                .top(layout.margin_top as i32)
                .bottom(layout.margin_bottom as i32)
                .left(layout.margin_left as i32)
                .right(layout.margin_right as i32),
        );

    for element in &document.elements {
        docx = match element {
            Element::Paragraph(p) => docx.add_paragraph(render_paragraph(p, typography)),
            Element::Table(t) => docx.add_table(render_table(t, layout.content_width(), typography)),
            Element::PageBreak => docx.add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_break(BreakType::Page)),
            ),
        };
    }
    docx
}

/// Write `document` to `path` as a `.docx` file.
///
/// The archive is packed into a sibling temp file that is renamed over
/// `path` on success, so a failed write never leaves a truncated document.
pub fn save(document: &Document, path: &Path) -> Result<(), Pdf2DocxError> {
    let write_failed = |source: std::io::Error| Pdf2DocxError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let tmp_path = path.with_extension("docx.tmp");
    let file = File::create(&tmp_path).map_err(write_failed)?;

    if let Err(e) = to_docx(document).build().pack(file) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Pdf2DocxError::DocxPackFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        });
    }
    debug!("Packed {} elements into {}", document.elements.len(), tmp_path.display());

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        write_failed(e)
    })?;

    info!("Wrote {}", path.display());
    Ok(())
}
