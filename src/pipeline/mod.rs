//! Pipeline stages for PDF-to-Word conversion.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ pdf ──▶ geometry ──▶ extract ──▶ assemble ──▶ write
//! (path)   (pdfium) (glyphs,     (pdfplumber) (elements)   (docx-rs)
//!                    rulings)
//! ```
//!
//! 1. [`input`]: validate the user-supplied path and PDF magic bytes
//! 2. [`pdf`]: bind pdfium, open the document, read glyph boxes and path
//!    segments
//! 3. [`geometry`]: turn glyphs and path segments into `pdfplumber` chars,
//!    lines and rectangles
//! 4. [`extract`]: run the table-strategy fallback chain per page
//! 5. [`assemble`]: company header, styled tables, special lines, footer
//! 6. [`write`]: render with `docx-rs` and save atomically

pub mod assemble;
pub mod extract;
pub mod geometry;
pub mod input;
pub mod pdf;
pub mod write;
