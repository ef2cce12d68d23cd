#![allow(dead_code)]

use std::path::PathBuf;

use thiserror::Error;

use crate::extraction::DocumentFormat;

/// Application-level error type.
/// Every variant maps to a user-visible status line via `user_message()`;
/// none of them abort the session on their own.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file type: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to extract text from {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            AppError::Extraction { .. } => "EXTRACTION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Io(_) => "IO_ERROR",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message surfaced to the user. Storage and internal failures are
    /// logged with their full cause before being summarised.
    pub fn user_message(&self) -> String {
        match self {
            AppError::UnsupportedFormat { path } => format!(
                "Skipping unsupported file: {} (supported: .{})",
                path.display(),
                DocumentFormat::SUPPORTED_EXTENSIONS.join(", .")
            ),
            AppError::Extraction { path, reason } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Failed to read {name}: {reason}")
            }
            AppError::Configuration(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => format!("Not found: {msg}"),
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                format!("A file operation failed: {e}")
            }
            AppError::Csv(e) => {
                tracing::error!("CSV error: {e}");
                format!("Export failed: {e}")
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {e}");
                format!("A saved draft could not be read or written: {e}")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        }
    }

    /// Only internal errors end a command; everything else is reported
    /// and the session carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Internal(_))
    }
}
