//! Input validation: make sure the path names a readable PDF before pdfium
//! sees it, so callers get a meaningful error rather than a pdfium failure.

use crate::error::Pdf2DocxError;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Leading bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate a local input path: it must exist, be readable and start with
/// the PDF magic bytes.
pub fn resolve_input(path: &Path) -> Result<PathBuf, Pdf2DocxError> {
    let path = path.to_path_buf();

    if !path.is_file() {
        return Err(Pdf2DocxError::FileNotFound { path });
    }

    match File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != PDF_MAGIC {
                return Err(Pdf2DocxError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(Pdf2DocxError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2DocxError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}
