//! Text extraction: turns an uploaded resume into one raw text blob.
//!
//! The format is resolved once from the file extension at upload time and
//! carried as a `DocumentFormat`; extraction then dispatches on that tag.
//! Parsing is delegated to `pdf-extract` and `docx-rs`.

pub mod docx;
pub mod pdf;
pub mod plain;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Supported resume formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    WordDoc,
}

impl DocumentFormat {
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &["pdf", "docx", "txt"];

    /// Resolves the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt") => Ok(DocumentFormat::PlainText),
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::WordDoc),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentFormat::PlainText => "text",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::WordDoc => "docx",
        };
        f.write_str(label)
    }
}

/// Extracts the raw text of `path`. Returns an empty string when the file
/// holds no extractable text; parse failures become `AppError::Extraction`.
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, AppError> {
    let text = match format {
        DocumentFormat::PlainText => plain::extract(path)?,
        DocumentFormat::Pdf => pdf::extract(path)?,
        DocumentFormat::WordDoc => docx::extract(path)?,
    };
    tracing::debug!(
        "Extracted {} chars from {} ({format})",
        text.len(),
        path.display()
    );
    Ok(text)
}

/// Reads the raw bytes of an upload, reporting failures as extraction errors
/// so the candidate is marked unscorable instead of failing the batch.
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>, AppError> {
    std::fs::read(path).map_err(|e| extraction_error(path, e))
}

pub(crate) fn extraction_error(path: &Path, reason: impl fmt::Display) -> AppError {
    AppError::Extraction {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
