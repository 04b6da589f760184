//! Error types for cyan-core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is missing or its content does not sniff as a PDF.
    #[error("not a PDF document: {}", .0.display())]
    NotPdf(PathBuf),

    /// A value could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}
