//! pdfium-backed [`PageSource`]: binds the pdfium shared library, opens the
//! document and turns each page into a [`PageContent`].
//!
//! pdfium uses a bottom-left origin; everything handed to the rest of the
//! pipeline is converted to top-left page coordinates in points.

use pdfium_render::prelude::*;
use pdfplumber_core::{BBox, Char, Line, Rect, TextOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::extract::PageSource;
use super::geometry::{glyph, shapes_from_path, PathPaint, PathPoint, SegmentKind};
use crate::error::Pdf2DocxError;
use crate::model::PageContent;

/// Bind to a pdfium library.
///
/// An explicit path wins. Otherwise a platform-named library next to the
/// running executable, then in the working directory, then whatever the
/// system loader finds.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, Pdf2DocxError> {
    if let Some(path) = explicit {
        debug!("Binding pdfium from {}", path.display());
        return Pdfium::bind_to_library(path)
            .map(Pdfium::new)
            .map_err(|e| Pdf2DocxError::PdfiumBindingFailed(format!("{}: {e:?}", path.display())));
    }

    for dir in candidate_dirs() {
        let lib = Pdfium::pdfium_platform_library_name_at_path(&dir);
        if lib.is_file() {
            if let Ok(bindings) = Pdfium::bind_to_library(&lib) {
                debug!("Bound pdfium from {}", lib.display());
                return Ok(Pdfium::new(bindings));
            }
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| Pdf2DocxError::PdfiumBindingFailed(format!("{e:?}")))
}

fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(dir);
    }
    dirs.push(PathBuf::from("./"));
    dirs
}

/// An open PDF document.
pub struct PdfiumSource<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumSource<'a> {
    /// Open `path`, mapping pdfium's load failures onto password and
    /// corruption errors.
    pub fn open(
        pdfium: &'a Pdfium,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Self, Pdf2DocxError> {
        let document = pdfium.load_pdf_from_file(path, password).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                if password.is_some() {
                    Pdf2DocxError::WrongPassword {
                        path: path.to_path_buf(),
                    }
                } else {
                    Pdf2DocxError::PasswordRequired {
                        path: path.to_path_buf(),
                    }
                }
            } else {
                Pdf2DocxError::CorruptPdf {
                    path: path.to_path_buf(),
                    detail: err_str,
                }
            }
        })?;

        info!("PDF loaded: {} pages", document.pages().len());
        Ok(Self { document })
    }
}

impl PageSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page(&self, index: usize) -> Result<PageContent, Pdf2DocxError> {
        let read_failed = |detail: String| Pdf2DocxError::PageReadFailed {
            page: index + 1,
            detail,
        };

        let page = self
            .document
            .pages()
            .get(index as PdfPageIndex)
            .map_err(|e| read_failed(format!("{e:?}")))?;

        let width = page.width().value as f64;
        let height = page.height().value as f64;

        let text = page.text().map_err(|e| read_failed(format!("{e:?}")))?;
        let mut chars: Vec<Char> = Vec::new();
        for ch in text.chars().iter() {
            let Some(c) = ch.unicode_char() else {
                continue;
            };
            if c.is_whitespace() || c.is_control() {
                continue;
            }
            let Ok(rect) = ch.loose_bounds() else {
                continue;
            };
            chars.push(glyph(
                c.to_string(),
                to_top_left(&rect, height),
                ch.font_name(),
                ch.scaled_font_size().value as f64,
            ));
        }

        let mut lines: Vec<Line> = Vec::new();
        let mut rects: Vec<Rect> = Vec::new();
        for object in page.objects().iter() {
            let Some(path) = object.as_path_object() else {
                continue;
            };
            let Ok(matrix) = path.matrix() else {
                continue;
            };
            // segment coordinates are in object space until transformed
            let segments = path.segments().transform(matrix);
            let points: Vec<PathPoint> = segments
                .iter()
                .map(|segment| PathPoint {
                    kind: segment_kind(segment.segment_type()),
                    x: segment.x().value as f64,
                    y: height - segment.y().value as f64,
                    close: segment.is_close(),
                })
                .collect();
            let paint = PathPaint {
                line_width: path.stroke_width().map_or(1.0, |w| w.value as f64),
                stroke: path.is_stroked().unwrap_or(false),
                fill: path
                    .fill_mode()
                    .map_or(false, |mode| mode != PdfPathFillMode::None),
            };
            let shapes = shapes_from_path(&points, paint);
            lines.extend(shapes.lines);
            rects.extend(shapes.rects);
        }

        debug!(
            page = index + 1,
            chars = chars.len(),
            lines = lines.len(),
            rects = rects.len(),
            "page primitives read"
        );

        let mut content = PageContent {
            index,
            width,
            height,
            text: String::new(),
            chars,
            lines,
            rects,
        };
        content.text = content.to_plumber_page().extract_text(&TextOptions::default());
        Ok(content)
    }
}

fn segment_kind(kind: PdfPathSegmentType) -> SegmentKind {
    match kind {
        PdfPathSegmentType::MoveTo => SegmentKind::MoveTo,
        PdfPathSegmentType::LineTo => SegmentKind::LineTo,
        PdfPathSegmentType::BezierTo | PdfPathSegmentType::Unknown => SegmentKind::CurveTo,
    }
}

fn to_top_left(rect: &PdfRect, page_height: f64) -> BBox {
    let left = rect.left().value as f64;
    let right = rect.right().value as f64;
    let top = page_height - rect.top().value as f64;
    let bottom = page_height - rect.bottom().value as f64;
    BBox::new(left.min(right), top.min(bottom), left.max(right), top.max(bottom))
}
